//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Prismo;

/// Clean the public directory
pub fn run(prismo: &Prismo) -> Result<()> {
    if prismo.public_dir.exists() {
        fs::remove_dir_all(&prismo.public_dir)?;
        tracing::info!("Deleted: {:?}", prismo.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_public_dir() {
        let dir = tempfile::tempdir().unwrap();
        let prismo = Prismo::new(dir.path()).unwrap();
        fs::create_dir_all(prismo.public_dir.join("post/x")).unwrap();

        run(&prismo).unwrap();
        assert!(!prismo.public_dir.exists());

        // Cleaning an already-clean site is not an error
        run(&prismo).unwrap();
    }
}
