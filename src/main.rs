//! `pickscene` command-line front end.
//!
//! Loads a description, optionally selects an entity (by id or from a
//! saved reference), and prints the model summary, the selection details
//! and a reusable reference as JSON.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use pickscene::options::Options;
use pickscene::scene::{EntityId, EntityKind};
use pickscene::selection::SelectionReference;
use pickscene::{SceneError, Session};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Build a pickable scene from a solid or molecule description"
)]
#[command(group(
    ArgGroup::new("selection").args(["restore", "face", "atom", "bond"])
))]
struct Cli {
    /// Description JSON file.
    #[arg(value_name = "PATH", required_unless_present = "schema")]
    description: Option<PathBuf>,

    /// Options TOML file; missing fields use defaults.
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,

    /// Restore a selection reference saved by an earlier run.
    #[arg(long, value_name = "PATH")]
    restore: Option<PathBuf>,

    /// Select a face group by id.
    #[arg(long, value_name = "N")]
    face: Option<usize>,

    /// Select an atom by index.
    #[arg(long, value_name = "N")]
    atom: Option<usize>,

    /// Select the bond from START to END.
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    bond: Option<Vec<usize>>,

    /// Print the options JSON schema and exit.
    #[arg(long)]
    schema: bool,
}

impl Cli {
    fn requested(&self) -> Option<(EntityKind, EntityId)> {
        if let Some(face) = self.face {
            return Some((EntityKind::Face, EntityId::Index(face)));
        }
        if let Some(atom) = self.atom {
            return Some((EntityKind::Atom, EntityId::Index(atom)));
        }
        match self.bond.as_deref() {
            Some(&[start, end]) => {
                Some((EntityKind::Bond, EntityId::Pair { start, end }))
            }
            _ => None,
        }
    }
}

fn run(cli: &Cli) -> Result<(), SceneError> {
    let mut out = std::io::stdout().lock();

    let options = match &cli.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if cli.schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())?;
        writeln!(out, "{schema}")?;
        return Ok(());
    }
    let Some(path) = &cli.description else {
        return Ok(());
    };

    let mut session = Session::new(options);
    let json = std::fs::read_to_string(path)?;
    let _ = session.load_json(&json)?;

    if let Some(reference_path) = &cli.restore {
        let reference = SelectionReference::from_json(&std::fs::read_to_string(
            reference_path,
        )?)?;
        if session.restore(&reference).is_none() {
            log::warn!("saved selection does not resolve in this model");
        }
    } else if let Some((kind, id)) = cli.requested() {
        if session.select_id(kind, id).is_none() {
            log::warn!("no {kind:?} with id {id:?}");
        }
    }

    let active = session.active();
    let overlays: Vec<_> = active
        .map(|a| {
            a.overlays()
                .iter()
                .map(|o| json!({"label": o.label.text, "degrees": o.degrees()}))
                .collect()
        })
        .unwrap_or_default();
    let report = json!({
        "summary": session.summary(),
        "diagnostics": active
            .map(|a| {
                a.diagnostics()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default(),
        "selection": active.and_then(|a| a.selection()).map(|s| s.details()),
        "overlays": overlays,
        "reference": session.snapshot(),
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("{cli:?}");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
