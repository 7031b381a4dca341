use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use serde::Serialize;
use svgscene::{
    Affine, FileResolver, ParleyShaper, ParseOptions, SceneNode, SceneParser, SceneRoot,
    UnresolvedPolicy, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "svgscene", version)]
struct Cli {
    /// Input SVG document.
    input: PathBuf,

    /// Fail on unsupported constructs instead of skipping them.
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Warn about `use` references and gradient chains that never resolve.
    #[arg(long, default_value_t = false)]
    warn_unresolved: bool,

    /// Shape text with this font file instead of monospace metrics.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Pretty-print the JSON summary.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Serialize)]
struct SceneSummary<'a> {
    viewport: Viewport,
    definitions: Vec<&'a str>,
    clip_paths: usize,
    nodes: usize,
    children: Vec<NodeSummary<'a>>,
}

#[derive(Serialize)]
struct NodeSummary<'a> {
    kind: &'static str,
    #[serde(skip_serializing_if = "is_empty")]
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    transform: Option<[f64; 6]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<NodeSummary<'a>>,
}

impl<'a> NodeSummary<'a> {
    fn new(node: &'a SceneNode) -> Self {
        Self {
            kind: node.kind_name(),
            id: node.id(),
            transform: node.transform().map(Affine::as_coeffs),
            instructions: match node {
                SceneNode::Shape(s) => Some(s.path.instructions.len()),
                _ => None,
            },
            text: match node {
                SceneNode::Text(t) => Some(t.run.text.as_str()),
                _ => None,
            },
            children: node.children().iter().map(Self::new).collect(),
        }
    }
}

fn is_empty(s: &&str) -> bool {
    s.is_empty()
}

fn summarize(scene: &SceneRoot) -> SceneSummary<'_> {
    SceneSummary {
        viewport: scene.viewport,
        definitions: scene.definitions.ids().collect(),
        clip_paths: scene.clip_paths.len(),
        nodes: scene.node_count(),
        children: scene.children.iter().map(NodeSummary::new).collect(),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let source = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("read svg '{}'", cli.input.display()))?;
    let assets_root = cli
        .input
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."));

    let options = ParseOptions {
        strict: cli.strict,
        unresolved_reference_policy: if cli.warn_unresolved {
            UnresolvedPolicy::Warn
        } else {
            UnresolvedPolicy::Silent
        },
    };
    let mut parser = SceneParser::new(options).with_image_resolver(FileResolver::new(assets_root));
    if let Some(font) = &cli.font {
        let bytes =
            std::fs::read(font).with_context(|| format!("read font '{}'", font.display()))?;
        let mut shaper = ParleyShaper::new();
        let family = shaper.register_font(bytes)?;
        tracing::info!(family = %family, "registered font");
        parser = parser.with_shaper(shaper);
    }

    let scene = parser
        .parse_str(&source)
        .with_context(|| format!("parse '{}'", cli.input.display()))?;
    let summary = summarize(&scene);
    let json = if cli.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{json}");
    Ok(())
}
