pub mod pdb;
pub mod ply;
