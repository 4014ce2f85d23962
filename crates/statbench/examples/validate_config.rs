use statbench::config::Config;
use statbench::runner::RunSettings;
use std::env;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("crates/statbench/configs/bench_file_io.toml")
    };

    println!("Validating config file: {}", config_path.display());

    let config = Config::from_file(&config_path)?;
    let settings = RunSettings::from_config(&config)?;

    println!("\n✓ Successfully parsed configuration!");
    println!("\nBinary: {}", settings.binary.display());
    println!("Iterations: {}", settings.iterations);
    println!("Warmup: {}", settings.warmup);
    println!("Timeout: {:?}", settings.timeout);
    if !settings.args.is_empty() {
        println!("Arguments: {}", settings.args.join(" "));
    }

    println!("\nFailure handling:");
    println!("  On failure: {:?}", settings.on_failure);
    println!("  Retries: {}", settings.retries);

    println!("\nOutput:");
    println!("  Path: {}", config.output.path.display());
    println!("  Format: {:?}", config.output.format);

    if settings.binary.is_file() {
        println!("\n✓ All validations passed!");
    } else {
        println!(
            "\n! Configuration is valid but {} is not built yet",
            settings.binary.display()
        );
    }

    Ok(())
}
