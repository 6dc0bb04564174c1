//! A small end-to-end demo: two generated files under an aggregator
//! command, run twice to show that the second session skips fresh
//! targets. Run with `RUST_LOG=gantry_engine=debug` to watch the
//! engine's decisions.

use gantry_core::Result;
use gantry_engine::Workspace;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let out_dir = std::env::temp_dir().join("gantry-demo");
    std::fs::create_dir_all(&out_dir)?;

    let mut ws = Workspace::builder()
        .root("OUT", format!("{}/", out_dir.display()))?
        .build();

    let greeting = ws.file_path("/OUT/greeting.txt")?;
    ws.new_file_task(
        "/OUT/greeting.txt",
        &[],
        Some(Box::new(move || {
            println!("  generating greeting.txt");
            std::fs::write(&greeting, "Hello, world\n")?;
            Ok(())
        })),
    )?;

    let shouting = ws.file_path("/OUT/shouting.txt")?;
    let source = ws.file_path("/OUT/greeting.txt")?;
    ws.new_file_task(
        "/OUT/shouting.txt",
        &["/OUT/greeting.txt"],
        Some(Box::new(move || {
            println!("  generating shouting.txt");
            let text = std::fs::read_to_string(&source)?;
            std::fs::write(&shouting, text.to_uppercase())?;
            Ok(())
        })),
    )?;

    ws.new_command_task("/OUT/all", &["/OUT/greeting.txt", "/OUT/shouting.txt"], None)?;

    println!("first build (everything is stale):");
    ws.start_session()?;
    ws.run("/OUT/all")?;
    ws.end_session()?;

    println!("second build (targets are fresh, nothing regenerates):");
    ws.start_session()?;
    ws.run("/OUT/shouting.txt")?;
    ws.end_session()?;

    println!("done; output in {}", out_dir.display());
    Ok(())
}
