use kb_core::prelude::*;

pub fn cmd() -> EmptyResult {
    print!("---\n{}", serde_yaml::to_string(&Build::crd())?);
    Ok(())
}
