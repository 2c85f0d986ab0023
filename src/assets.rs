use std::path::{Path, PathBuf};

pub fn resolve_assets_root(cli: Option<PathBuf>) -> PathBuf {
    // Precedence: CLI flag -> VORLD_ASSETS env -> search nearby dirs -> CWD
    if let Some(p) = cli.filter(|p| p.exists()) {
        return p;
    }
    if let Some(p) = std::env::var_os("VORLD_ASSETS").map(PathBuf::from) {
        if p.exists() {
            return p;
        }
    }
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }
    if let Some(dir) = std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
        candidates.push(dir);
    }
    candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));

    for base in candidates {
        // Climb up to 5 parents looking for the block table.
        for dir in base.ancestors().take(6) {
            if blocks_path(dir).exists() {
                return dir.to_path_buf();
            }
        }
    }
    PathBuf::from(".")
}

pub fn blocks_path(root: &Path) -> PathBuf {
    root.join("assets/voxels/blocks.toml")
}
