//! scene-scrub CLI - run material cleanup on JSON scene documents.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use scene_scrub::prelude::*;
use scene_scrub::util::build_stamp;
use tracing_subscriber::EnvFilter;

/// Global options parsed ahead of the command.
struct Options {
    level: &'static str,
    settings: Option<PathBuf>,
    args: Vec<String>,
}

fn parse_args(raw: &[String]) -> anyhow::Result<Options> {
    let mut opts = Options { level: "info", settings: None, args: Vec::new() };
    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-v" | "--verbose" => opts.level = "debug",
            "-vv" | "--trace" => opts.level = "trace",
            "-q" | "--quiet" => opts.level = "error",
            "-s" | "--settings" => {
                let path = iter.next().context("--settings needs a file argument")?;
                opts.settings = Some(PathBuf::from(path));
            }
            _ => opts.args.push(arg.clone()),
        }
    }
    Ok(opts)
}

fn init_logging(level: &str) {
    // RUST_LOG wins over the command-line verbosity.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let opts = match parse_args(&raw) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    init_logging(opts.level);

    if let Err(e) = run(&opts) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(opts: &Options) -> anyhow::Result<()> {
    let args: Vec<&str> = opts.args.iter().map(String::as_str).collect();
    let Some(&command) = args.first() else {
        print_help();
        return Ok(());
    };

    match command {
        "clean" | "c" => {
            let Some(&input) = args.get(1) else {
                bail!("missing file argument\nUsage: scene-scrub clean <in.json> [out.json]");
            };
            let output = args.get(2).copied().unwrap_or(input);
            cmd_clean(Path::new(input), Path::new(output), load_settings(opts)?)
        }
        "materials" | "m" => {
            let Some(&input) = args.get(1) else {
                bail!("missing file argument\nUsage: scene-scrub materials <in.json>");
            };
            cmd_materials(Path::new(input), load_settings(opts)?)
        }
        "resolve" | "r" => {
            if args.len() < 2 {
                bail!("missing name argument\nUsage: scene-scrub resolve <name>...");
            }
            cmd_resolve(&args[1..], &load_settings(opts)?);
            Ok(())
        }
        "help" | "h" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        other => {
            print_help();
            bail!("unknown command: {}", other)
        }
    }
}

fn load_settings(opts: &Options) -> anyhow::Result<ScrubSettings> {
    match &opts.settings {
        Some(path) => ScrubSettings::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(ScrubSettings::load()),
    }
}

fn cmd_clean(input: &Path, output: &Path, settings: ScrubSettings) -> anyhow::Result<()> {
    tracing::info!("opening {}", input.display());
    let mut scene = MemoryScene::open(input)
        .with_context(|| format!("failed to open {}", input.display()))?;
    tracing::debug!("{} objects, {} materials", scene.num_objects(), scene.materials().len());

    let report = Scrubber::new(&mut scene, settings).clean_up()?;

    scene
        .save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("{}", report);
    println!("Wrote {}", output.display());
    Ok(())
}

fn cmd_materials(input: &Path, settings: ScrubSettings) -> anyhow::Result<()> {
    let mut scene = MemoryScene::open(input)
        .with_context(|| format!("failed to open {}", input.display()))?;
    let scrubber = Scrubber::new(&mut scene, settings);
    let usages = scrubber.material_usages()?;

    println!("Materials ({}):", usages.len());
    for name in scrubber.list_material_names() {
        let count = usages.get(&name).copied().unwrap_or(0);
        let resolved = scrubber.resolved_map().resolve(&name);
        if resolved == name {
            println!("  {:<48} {:>4}", name, count);
        } else {
            println!("  {:<48} {:>4}  -> {}", name, count, resolved);
        }
    }
    Ok(())
}

fn cmd_resolve(names: &[&str], settings: &ScrubSettings) {
    let resolved = settings.resolved_map();
    for name in names {
        println!("{} -> {}", name, resolved.resolve(name));
    }
}

fn print_help() {
    println!("{}", build_stamp());
    println!();
    println!("USAGE:");
    println!("    scene-scrub [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    c, clean     <in> [out]   Run the full cleanup batch (overwrites <in> by default)");
    println!("    m, materials <in>         List materials with usage counts and final names");
    println!("    r, resolve   <name>...    Print the final name of raw material names");
    println!("    h, help                   Show this help");
    println!();
    println!("OPTIONS:");
    println!("    -s, --settings <file>    Settings JSON (default: per-user settings or built-ins)");
    println!("    -v, --verbose            Show debug output");
    println!("    -vv, --trace             Show trace output (very verbose)");
    println!("    -q, --quiet              Only show errors");
    println!();
    println!("EXAMPLES:");
    println!("    scene-scrub clean putnam.json putnam.clean.json");
    println!("    scene-scrub materials putnam.json");
    println!("    scene-scrub resolve Color_K01 Mirror_01");
    println!();
    println!("NOTES:");
    println!("    - RUST_LOG overrides -v/-vv/-q");
    println!("    - Errors abort the batch; the output file is only written on success");
}
