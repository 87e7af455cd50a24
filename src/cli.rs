use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use thiserror::Error;

use html::ParseOptions;
use selection_map::outline::outline_from_content;
use selection_map::{Boundary, ContentView, InputMode, RenderOptions, Selection};

/// Render markup into a content tree and map selections back to source bytes
#[derive(Parser, Debug)]
#[command(name = "doccanvas", version, about, long_about = None)]
pub struct Cli {
    /// Markup file to render (`-` reads stdin)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Treat the input as body content instead of a full document
    #[arg(long)]
    pub fragment: bool,

    /// Parse without source locations (nothing will resolve)
    #[arg(long)]
    pub no_locations: bool,

    /// Add data-source-* attributes to mapped elements
    #[arg(long)]
    pub debug_attributes: bool,

    /// Print the parse tree outline before rendering
    #[arg(long)]
    pub parse_tree: bool,

    /// Resolve a selection given as two INDEX:OFFSET boundaries
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub select: Option<Vec<BoundaryArg>>,

    /// Maximum number of outline lines
    #[arg(long, default_value_t = 500)]
    pub cap: usize,
}

impl Cli {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            mode: if self.fragment {
                InputMode::Fragment
            } else {
                InputMode::Document
            },
            parse: ParseOptions {
                source_locations: !self.no_locations,
            },
            debug_attributes: self.debug_attributes,
        }
    }
}

/// A selection boundary as typed on the command line: `INDEX:OFFSET`, where
/// `INDEX` is a node index from the content outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryArg {
    pub index: usize,
    pub offset: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoundaryArgError {
    #[error("expected INDEX:OFFSET, got {0:?}")]
    MissingSeparator(String),
    #[error("invalid node index {0:?}")]
    InvalidIndex(String),
    #[error("invalid offset {0:?}")]
    InvalidOffset(String),
}

impl FromStr for BoundaryArg {
    type Err = BoundaryArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, offset) = s
            .split_once(':')
            .ok_or_else(|| BoundaryArgError::MissingSeparator(s.to_string()))?;
        let index = index
            .trim()
            .parse()
            .map_err(|_| BoundaryArgError::InvalidIndex(index.to_string()))?;
        let offset = offset
            .trim()
            .parse()
            .map_err(|_| BoundaryArgError::InvalidOffset(offset.to_string()))?;
        Ok(Self { index, offset })
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read markup from stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn boundary(view: &ContentView, arg: BoundaryArg) -> Result<Boundary> {
    let node = view
        .node_at_index(arg.index)
        .with_context(|| format!("no node with index {} in the content outline", arg.index))?;
    Ok(Boundary::new(node, arg.offset))
}

pub fn run(cli: &Cli) -> Result<()> {
    let markup = read_input(&cli.file)?;
    let options = cli.render_options();

    if cli.parse_tree {
        let parse_tree = match options.mode {
            InputMode::Document => html::parse(&markup, options.parse),
            InputMode::Fragment => html::parse_fragment(&markup, options.parse),
        };
        for line in html::debug::outline_from_tree(&parse_tree, cli.cap) {
            println!("{line}");
        }
        println!();
    }

    let mut view = ContentView::new(options);
    view.render_markup(&markup);
    log::info!(
        "rendered {} nodes, {} mapped",
        view.tree().node_count(),
        view.index().len()
    );

    let Some(select) = cli.select.as_deref() else {
        for line in outline_from_content(view.tree(), view.index(), cli.cap) {
            println!("{line}");
        }
        return Ok(());
    };
    let [start, end] = select else {
        anyhow::bail!("--select takes exactly two boundaries");
    };
    let selection = Selection::new(boundary(&view, *start)?, boundary(&view, *end)?);
    let result = view
        .map_selection(&selection)
        .context("selection does not map back to the source")?;
    println!("range: {}..{}", result.range.start, result.range.end);
    println!("selected text: {:?}", result.selected_text);
    println!("source snippet:");
    println!("{}", result.source_snippet);
    Ok(())
}
