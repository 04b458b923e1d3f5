use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Chain selection cannot be empty.")]
    EmptyChainSpec,

    #[error("Invalid chain identifier '{0}' in chain selection '{1}'.")]
    InvalidChainId(char, String),

    #[error("Invalid chain range '{start}-{end}' in '{spec}'. The start must not come after the end.")]
    ReversedRange { start: char, end: char, spec: String },

    #[error("Dangling '-' in chain selection '{0}'. Expected a range such as 'A-E'.")]
    DanglingRange(String),
}

/// Parses a chain selection such as `A-E`, `ABDEG` or `A-CX` into chain IDs.
///
/// Single letters select one chain and `X-Y` selects the inclusive range from
/// `X` to `Y`. Chains are returned in the order given, each at most once.
pub fn parse_chain_spec(spec: &str) -> Result<Vec<char>, ParseError> {
    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyChainSpec);
    }

    let chars: Vec<char> = trimmed.chars().collect();
    let mut chains = Vec::new();
    let mut push = |c: char| {
        if !chains.contains(&c) {
            chains.push(c);
        }
    };

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '-' {
            return Err(ParseError::DanglingRange(spec.to_string()));
        }
        if !c.is_ascii_alphanumeric() {
            return Err(ParseError::InvalidChainId(c, spec.to_string()));
        }

        if chars.get(i + 1) == Some(&'-') {
            let end = *chars
                .get(i + 2)
                .ok_or_else(|| ParseError::DanglingRange(spec.to_string()))?;
            if !end.is_ascii_alphanumeric() {
                return Err(ParseError::InvalidChainId(end, spec.to_string()));
            }
            if end < c {
                return Err(ParseError::ReversedRange {
                    start: c,
                    end,
                    spec: spec.to_string(),
                });
            }
            (c..=end).for_each(&mut push);
            i += 3;
        } else {
            push(c);
            i += 1;
        }
    }

    Ok(chains)
}
