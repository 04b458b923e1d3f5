use crate::cli::ChainsArgs;
use crate::error::{CliError, Result};
use crate::io::pdb::PdbStructure;
use tracing::info;

pub fn run(args: ChainsArgs) -> Result<()> {
    info!("Loading input structure from {:?}", &args.input);
    let structure =
        PdbStructure::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;

    let chains = structure.chains();
    info!(count = chains.len(), "Chains found.");
    if chains.is_empty() {
        println!("No ATOM or HETATM records found in {}.", args.input.display());
        return Ok(());
    }

    println!("{}", summarize(&structure, &chains));
    Ok(())
}

fn summarize(structure: &PdbStructure, chains: &[char]) -> String {
    let mut lines = vec![format!("Chains: {}", chains.iter().collect::<String>())];
    for &chain in chains {
        let (hetero, standard): (Vec<_>, Vec<_>) = structure
            .atoms()
            .iter()
            .filter(|atom| atom.chain_id == chain)
            .partition(|atom| atom.is_hetero);
        lines.push(format!(
            "  {}: {} atoms, {} hetero atoms",
            chain,
            standard.len(),
            hetero.len()
        ));
    }
    lines.join("\n")
}
