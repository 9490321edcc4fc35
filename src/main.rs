use clap::{Parser, Subcommand};
use portfolio::controller::PageEvent;
use portfolio::platform::HeadlessPlatform;
use portfolio::rendering::{encode, render_fallback_card, ImageFormat};
use portfolio::{Field, PageBinding, PageConfig, PageController, SimulatedTransport, SubmissionState};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "portfolio")]
#[command(about = "Drive the portfolio page without a browser")]
#[command(version)]
struct Cli {
    /// JSON file overriding page defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that a page satisfies the controller's DOM contract
    Check { html: PathBuf },
    /// Write fallback cards for images that have no source
    Placeholders {
        html: PathBuf,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Run one simulated contact form submission
    Submit {
        html: PathBuf,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "")]
        message: String,
        /// Seed for the simulated delivery outcome
        #[arg(long)]
        seed: Option<u64>,
        /// Print the final page state as JSON
        #[arg(long)]
        json: bool,
    },
}

fn load_binding(path: &Path) -> portfolio::Result<PageBinding> {
    let html = std::fs::read_to_string(path)?;
    PageBinding::from_html(&html)
}

fn slug(label: &str) -> String {
    label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn check(html: &Path) -> portfolio::Result<bool> {
    let binding = load_binding(html)?;
    println!(
        "ok: {} nav links, {} sections, {} projects, {} animated blocks, {} images",
        binding.nav_links.len(),
        binding.sections.len(),
        binding.projects.len(),
        binding.animated.len(),
        binding.images.len()
    );
    for link in &binding.nav_links {
        if !binding.sections.contains(&link.target) {
            println!("note: nav link #{} has no matching section", link.target);
        }
    }
    Ok(true)
}

fn placeholders(html: &Path, out: &Path) -> portfolio::Result<bool> {
    let binding = load_binding(html)?;
    std::fs::create_dir_all(out)?;
    let mut written = 0;
    for slot in binding.images.iter().filter(|s| !s.has_source) {
        let card = render_fallback_card(slot.label, slot.color)?;
        let path = out.join(format!("{}.png", slug(slot.label)));
        std::fs::write(&path, encode(&card, ImageFormat::Png)?)?;
        println!("{} -> {}", slot.selector, path.display());
        written += 1;
    }
    log::info!("wrote {} placeholder card(s)", written);
    Ok(true)
}

fn submit(html: &Path, config: PageConfig, values: [String; 4], seed: Option<u64>, json: bool) -> portfolio::Result<bool> {
    let binding = load_binding(html)?;
    let transport = match seed {
        Some(seed) => SimulatedTransport::seeded(config.submit_delay_ms, config.submit_success_rate, seed),
        None => SimulatedTransport::new(config.submit_delay_ms, config.submit_success_rate),
    };
    let mut page = PageController::new(binding, config, Box::new(HeadlessPlatform::new()), Box::new(transport))?;
    page.init();
    for (field, value) in Field::ALL.into_iter().zip(values) {
        page.dispatch(PageEvent::Input { field, value });
    }
    page.dispatch(PageEvent::Submit);
    while page.submission_state() == SubmissionState::Submitting {
        match page.next_deadline() {
            Some(due) => page.advance_to(due),
            None => break,
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(page.view()).map_err(|e| portfolio::Error::Other(e.to_string()))?);
    }
    let Some(notification) = page.view().notification.as_ref() else {
        return Ok(false);
    };
    println!("[{}] {}", notification.kind.class(), notification.message);
    for field in Field::ALL {
        let group = page.form().group(field);
        if group.status.is_error() {
            println!("  {}: {}", field, group.message);
        }
    }
    Ok(notification.kind == portfolio::view::NotificationKind::Success)
}

fn run(cli: Cli) -> portfolio::Result<bool> {
    let config = match &cli.config {
        Some(path) => PageConfig::from_json_file(path)?,
        None => PageConfig::default(),
    };
    match cli.command {
        Command::Check { html } => check(&html),
        Command::Placeholders { html, out } => placeholders(&html, &out),
        Command::Submit {
            html,
            name,
            email,
            subject,
            message,
            seed,
            json,
        } => submit(&html, config, [name, email, subject, message], seed, json),
    }
}

fn main() -> ExitCode {
    let _logger = match flexi_logger::Logger::try_with_env_or_str("info").and_then(|l| l.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("logger unavailable: {}", e);
            None
        }
    };

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
