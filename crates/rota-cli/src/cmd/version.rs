use crate::output::print_json;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn build_time() -> &'static str {
    option_env!("AUTOASSIGNER_BUILD_TIME").unwrap_or("unknown")
}

fn git_commit() -> &'static str {
    option_env!("AUTOASSIGNER_GIT_COMMIT").unwrap_or("unknown")
}

pub fn describe() -> String {
    format!(
        "Version: {VERSION}\nBuild Time: {}\nGit Commit: {}",
        build_time(),
        git_commit()
    )
}

pub fn run(json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&serde_json::json!({
            "version": VERSION,
            "build_time": build_time(),
            "git_commit": git_commit(),
        }));
    }
    println!("{}", describe());
    Ok(())
}
