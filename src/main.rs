//! handctl - Gesture-driven hands-free computer control
//!
//! One hand selects the control mode, the other issues commands in it.

use handctl::app::cli::{Cli, Commands, ConfigAction, ControlsAction};
use handctl::app::config::Config;
use handctl::control::Handlers;
use handctl::engine::gesture::GESTURE_TABLE;
use handctl::engine::mode::Mode;
use handctl::engine::session::Session;
use handctl::engine::GestureEngine;
use handctl::platform::detector::SubprocessSource;
use handctl::platform::{ControlDeps, Platform};
use handctl::store::{ControlStore, UserControlMap, SLOT_NAMES};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Run { duration, detector } => {
            run_session(duration, detector, config)?;
        }
        Commands::Modes => {
            run_modes();
        }
        Commands::Controls { action } => {
            run_controls(action)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
    }

    Ok(())
}

fn run_session(
    duration: u64,
    detector_override: Option<String>,
    mut config: Config,
) -> anyhow::Result<()> {
    if let Some(command_line) = detector_override {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        config.detector.command = parts.next().unwrap_or_default();
        config.detector.args = parts.collect();
    }

    // The control store is read once at startup; custom-launch gestures
    // become no-ops when it is empty.
    let store = ControlStore::new(&Cli::data_dir());
    let record = store.load_or_init()?;

    let platform = Platform::current();
    let deps = ControlDeps::detect(&config);
    let handlers = Handlers::new(&config, platform, record.controls.clone());
    let engine = GestureEngine::new(&config, deps, handlers);

    let source = SubprocessSource::spawn(&config.detector)?;
    let session = Session::spawn(Box::new(source), engine)?;
    info!("Control session started - show your hands to the camera");

    // Set up Ctrl+C handler
    let stop_flag = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let stop_flag_handler = stop_flag.clone();
    ctrlc::set_handler(move || {
        stop_flag_handler.store(true, std::sync::atomic::Ordering::SeqCst);
    })?;

    let start_time = std::time::Instant::now();
    let mut last = session.snapshot();

    // Host polling loop (~30 Hz): read-only, eventually consistent
    loop {
        if stop_flag.load(std::sync::atomic::Ordering::SeqCst) {
            info!("Stop requested");
            break;
        }
        if duration > 0 && start_time.elapsed().as_secs() >= duration {
            info!("Session duration reached");
            break;
        }
        if !session.is_alive() {
            warn!("Gesture worker stopped (capture failure?); ending session");
            break;
        }

        let snapshot = session.snapshot();
        if snapshot.mode != last.mode || snapshot.action != last.action {
            info!(mode = snapshot.mode_label, action = snapshot.action, "state");
            last = snapshot;
        }

        std::thread::sleep(std::time::Duration::from_millis(33));
    }

    session.stop();
    info!("Control session ended after {:.1}s", start_time.elapsed().as_secs_f64());

    Ok(())
}

fn run_modes() {
    println!("Mode-select gestures (stabilized):");
    for (vector, gesture) in GESTURE_TABLE {
        let mode = Mode::for_gesture(gesture)
            .map(Mode::label)
            .unwrap_or("-");
        println!("  {vector}  {:32} -> {mode}", gesture.label());
    }
    println!();
    println!("Command-hand behavior per mode:");
    for mode in [
        Mode::VolumeControl,
        Mode::BrightnessControl,
        Mode::MediaControl,
        Mode::WindowControl,
        Mode::BrowserControl,
        Mode::MouseControl,
        Mode::GameControl,
        Mode::VirtualKeyboard,
        Mode::CustomAppLaunch,
    ] {
        println!("  {:20} {}", mode.label(), mode.hint());
    }
}

fn run_controls(action: ControlsAction) -> anyhow::Result<()> {
    let store = ControlStore::new(&Cli::data_dir());
    let mut record = store.load_or_init()?;

    match action {
        ControlsAction::Show => {
            println!("Custom app-launch gestures ({}):", store.path().display());
            for slot in SLOT_NAMES {
                let targets = record.controls.targets(slot);
                if targets.is_empty() {
                    println!("  {slot:34} (unset)");
                } else {
                    println!("  {slot:34} {}", targets.join(" | "));
                }
            }
        }
        ControlsAction::Set { slot, targets } => {
            if !UserControlMap::is_slot_name(&slot) {
                anyhow::bail!(
                    "Unknown gesture slot '{}'. Valid slots: {}",
                    slot,
                    SLOT_NAMES.join(", ")
                );
            }
            record.controls.set(&slot, targets);
            store.save(&record)?;
            println!("Updated '{}': {}", slot, record.controls.targets(&slot).join(" | "));
        }
        ControlsAction::Clear { slot } => {
            if !UserControlMap::is_slot_name(&slot) {
                anyhow::bail!(
                    "Unknown gesture slot '{}'. Valid slots: {}",
                    slot,
                    SLOT_NAMES.join(", ")
                );
            }
            record.controls.clear(&slot);
            store.save(&record)?;
            println!("Cleared '{slot}'");
        }
    }

    Ok(())
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    // Seed the control store and installation id
    let store = ControlStore::new(&Cli::data_dir());
    let record = store.load_or_init()?;
    println!("Control store at {:?} (installation {})", store.path(), record.id);

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", toml_str);
        }
        ConfigAction::Get { key } => {
            let toml_str = config.to_toml()?;
            // Simple key lookup in TOML output
            let value = find_toml_value(&toml_str, &key);
            match value {
                Some(v) => println!("{} = {}", key, v),
                None => {
                    anyhow::bail!("Configuration key '{}' not found", key);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let config_path = Config::default_path();
            if !config_path.exists() {
                anyhow::bail!("No config file found. Run 'handctl init' first.");
            }

            // Load, modify, and save
            let mut toml_content = std::fs::read_to_string(&config_path)?;
            if set_toml_value(&mut toml_content, &key, &value) {
                // Re-validate before persisting
                let updated: Config = toml::from_str(&toml_content)
                    .map_err(|e| anyhow::anyhow!("Invalid value for '{}': {}", key, e))?;
                updated.validate()?;
                std::fs::write(&config_path, &toml_content)?;
                println!("Set {} = {}", key, value);
            } else {
                anyhow::bail!("Failed to set '{}'. Key may not exist in config.", key);
            }
        }
        ConfigAction::Reset { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            let default_config = Config::default();
            default_config.save_default()?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}

/// Simple TOML value lookup by dotted key
fn find_toml_value<'a>(toml_str: &'a str, key: &str) -> Option<&'a str> {
    let parts: Vec<&str> = key.split('.').collect();
    let leaf_key = parts.last()?;

    // Find the right section
    let mut in_section = parts.len() == 1; // Top-level key
    let section_name = if parts.len() > 1 { parts[0] } else { "" };

    for line in toml_str.lines() {
        let trimmed = line.trim();

        // Check for section header
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let section = &trimmed[1..trimmed.len() - 1];
            in_section = section == section_name;
            continue;
        }

        if in_section {
            if let Some(eq_pos) = trimmed.find('=') {
                let line_key = trimmed[..eq_pos].trim();
                if line_key == *leaf_key {
                    return Some(trimmed[eq_pos + 1..].trim());
                }
            }
        }
    }

    None
}

/// Simple TOML value setter by dotted key
fn set_toml_value(toml_str: &mut String, key: &str, value: &str) -> bool {
    let parts: Vec<&str> = key.split('.').collect();
    let Some(leaf_key) = parts.last() else {
        return false;
    };

    let section_name = if parts.len() > 1 { parts[0] } else { "" };
    let mut in_section = parts.len() == 1;
    let mut found = false;

    let lines: Vec<String> = toml_str.lines().map(|l| l.to_string()).collect();
    let mut new_lines = Vec::with_capacity(lines.len());

    for line in &lines {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let section = &trimmed[1..trimmed.len() - 1];
            in_section = section == section_name;
        }

        if in_section && !found {
            if let Some(eq_pos) = trimmed.find('=') {
                let line_key = trimmed[..eq_pos].trim();
                if line_key == *leaf_key {
                    new_lines.push(format!("{} = {}", leaf_key, value));
                    found = true;
                    continue;
                }
            }
        }

        new_lines.push(line.clone());
    }

    if found {
        *toml_str = new_lines.join("\n");
        // Ensure trailing newline
        if !toml_str.ends_with('\n') {
            toml_str.push('\n');
        }
    }

    found
}
