use crate::config::{Config, load_config, resolve_layout_config};
use crate::host::HostDocument;
use crate::input::{load_dataset, load_document};
use crate::layout::CanvasSession;
use crate::placement_dump::{PlacementDump, write_json};
use crate::planner::insert_recommendations;
use crate::viz::{StudyType, select};
use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "rcanvas",
    version,
    about = "Pick research visualizations and place them on a canvas"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank the visualizations worth rendering for an insights dataset
    Select(CommonArgs),
    /// Rank visualizations and insert them into a document snapshot
    Place(PlaceArgs),
}

#[derive(ClapArgs, Debug)]
pub struct CommonArgs {
    /// Insights dataset (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Study type, e.g. "evaluative usability test"
    #[arg(short = 's', long = "studyType")]
    pub study_type: Option<String>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config file (JSON or JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct PlaceArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Document snapshot (.json)
    #[arg(short = 'd', long = "document")]
    pub document: PathBuf,

    /// Insert at most this many visualizations
    #[arg(short = 'n', long = "limit")]
    pub limit: Option<usize>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    match args.command {
        Command::Select(common) => run_select(&common),
        Command::Place(place) => run_place(&place),
    }
}

fn study_type_for(common: &CommonArgs, config: &Config) -> String {
    common
        .study_type
        .clone()
        .unwrap_or_else(|| config.study_type.clone())
}

fn run_select(common: &CommonArgs) -> Result<()> {
    let config = load_config(common.config.as_deref())?;
    let dataset = load_dataset(&common.input)?;
    let study_type = study_type_for(common, &config);
    let ranked = select(&dataset, &study_type);
    info!(study = %StudyType::normalize(&study_type), count = ranked.len(), "selected visualizations");
    write_json(&ranked, common.output.as_deref())
}

fn run_place(args: &PlaceArgs) -> Result<()> {
    let common = &args.common;
    if common.input.as_os_str() == "-" && args.document.as_os_str() == "-" {
        return Err(anyhow::anyhow!(
            "Dataset and document cannot both be read from stdin"
        ));
    }
    let config = load_config(common.config.as_deref())?;
    let dataset = load_dataset(&common.input)?;
    let mut doc = load_document(&args.document)?;

    let study_type = study_type_for(common, &config);
    let limit = args.limit.or(config.limit);
    let mut session = CanvasSession::new(config.artifact_prefix.clone());
    let ranked = select(&dataset, &study_type);
    let planned = insert_recommendations(
        &ranked,
        &mut doc,
        &mut session,
        limit,
        &config.sizes,
    );

    let dump = PlacementDump::from_run(
        StudyType::normalize(&study_type),
        resolve_layout_config(doc.document_kind()),
        ranked,
        &planned,
        &session,
        &doc,
    );
    write_json(&dump, common.output.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_place_command() {
        let args = Args::try_parse_from([
            "rcanvas",
            "place",
            "-i",
            "insights.json",
            "-d",
            "doc.json",
            "-s",
            "evaluative",
            "-n",
            "2",
        ])
        .unwrap();
        let Command::Place(place) = args.command else {
            panic!("expected place command");
        };
        assert_eq!(place.common.input, PathBuf::from("insights.json"));
        assert_eq!(place.document, PathBuf::from("doc.json"));
        assert_eq!(place.common.study_type.as_deref(), Some("evaluative"));
        assert_eq!(place.limit, Some(2));
    }

    #[test]
    fn select_requires_input() {
        assert!(Args::try_parse_from(["rcanvas", "select"]).is_err());
    }

    #[test]
    fn study_type_falls_back_to_config() {
        let common = CommonArgs {
            input: PathBuf::from("-"),
            study_type: None,
            output: None,
            config: None,
        };
        let mut config = Config::default();
        config.study_type = "comparative".to_string();
        assert_eq!(study_type_for(&common, &config), "comparative");
    }
}
