mod provenance;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use halfplane::{DynamicPolygon, Line};
use polars::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

use provenance::{ensure_parent, RunSummary, Sidecar};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Dynamic half-plane intersection runner")]
struct Cmd {
    /// Optional run label; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Cut a rectangle by half-planes (CSV columns px,py,qx,qy) and write the
    /// area after every cut as JSON
    Areas {
        #[arg(long)]
        input: String,
        /// Bounding rectangle as x1,y1,x2,y2
        #[arg(long, value_parser = parse_rect, allow_hyphen_values = true)]
        rect: Rect,
        #[arg(long)]
        out: String,
    },
    /// Area newly covered by each polyline (headerless CSV, one row of
    /// heights per polyline, unit-width columns)
    Decorations {
        #[arg(long)]
        input: String,
        /// Height of the uncovered region above each column
        #[arg(long, default_value_t = 2000.0)]
        height: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Rect {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

fn parse_rect(s: &str) -> std::result::Result<Rect, String> {
    let v: Vec<f64> = s
        .split(',')
        .map(|t| t.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| format!("bad rect {s:?}: {e}"))?;
    match v.as_slice() {
        [x1, y1, x2, y2] => Ok(Rect {
            x1: *x1,
            y1: *y1,
            x2: *x2,
            y2: *y2,
        }),
        _ => Err(format!("rect needs 4 numbers x1,y1,x2,y2, got {}", v.len())),
    }
}

#[derive(Serialize)]
struct Step {
    step: usize,
    area: f64,
    edges: usize,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Areas { input, rect, out } => areas(input, rect, out, cmd.tag),
        Action::Decorations { input, height } => decorations(input, height, cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn areas(input: String, rect: Rect, out: String, tag: Option<String>) -> Result<()> {
    tracing::info!(input, out, ?rect, tag = ?tag, "areas");
    let df = read_csv(&input, true)?;
    let px = f64_column(&df, "px")?;
    let py = f64_column(&df, "py")?;
    let qx = f64_column(&df, "qx")?;
    let qy = f64_column(&df, "qy")?;
    let cuts: Vec<Line> = (0..df.height())
        .map(|i| Line::from_coords(px[i], py[i], qx[i], qy[i]))
        .collect();

    let steps = run_cuts(rect, &cuts)?;
    let summary = summarize(rect, &steps);
    tracing::info!(
        cuts = summary.cuts,
        area = summary.final_area,
        edges = summary.final_edges,
        emptied_at = ?summary.emptied_at,
        "areas_done"
    );

    let out_path = Path::new(&out);
    ensure_parent(out_path)?;
    fs::write(out_path, serde_json::to_vec_pretty(&steps)?)
        .with_context(|| format!("writing {out}"))?;

    let tags: Vec<String> = tag.into_iter().collect();
    let bounds = [rect.x1, rect.y1, rect.x2, rect.y2];
    let sidecar = Sidecar::new(out_path, &input, bounds, &summary, &tags);
    let prov = provenance::write_sidecar(out_path, &sidecar)?;
    tracing::info!(provenance = %prov.display(), "sidecar");
    Ok(())
}

/// Area and edge count after each cut, starting from `rect`.
fn run_cuts(rect: Rect, cuts: &[Line]) -> Result<Vec<Step>> {
    let mut poly = DynamicPolygon::new(rect.x1, rect.y1, rect.x2, rect.y2)?;
    let mut steps = Vec::with_capacity(cuts.len());
    for (i, h) in cuts.iter().enumerate() {
        let was_empty = poly.is_empty();
        poly.add(h);
        if !was_empty && poly.is_empty() {
            tracing::debug!(step = i + 1, "region became empty");
        }
        steps.push(Step {
            step: i + 1,
            area: poly.area(),
            edges: poly.len(),
        });
    }
    Ok(steps)
}

/// Final state of a run; an empty cut list leaves the rectangle untouched.
fn summarize(rect: Rect, steps: &[Step]) -> RunSummary {
    let (final_area, final_edges) = steps.last().map_or(
        ((rect.x2 - rect.x1) * (rect.y2 - rect.y1), 4),
        |s| (s.area, s.edges),
    );
    RunSummary {
        cuts: steps.len(),
        final_area,
        final_edges,
        emptied_at: steps.iter().find(|s| s.edges == 0).map(|s| s.step),
    }
}

fn decorations(input: String, height: f64, tag: Option<String>) -> Result<()> {
    tracing::info!(input, height, tag = ?tag, "decorations");
    let df = read_csv(&input, false)?;
    let names: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
    let cols = names
        .iter()
        .map(|n| f64_column(&df, n))
        .collect::<Result<Vec<_>>>()?;
    let polylines: Vec<Vec<f64>> = (0..df.height())
        .map(|i| cols.iter().map(|c| c[i]).collect())
        .collect();
    for a in covered_areas(&polylines, height)? {
        println!("{a:.12}");
    }
    Ok(())
}

/// Area each polyline newly covers, drawing them in order over unit columns.
fn covered_areas(polylines: &[Vec<f64>], height: f64) -> Result<Vec<f64>> {
    let Some(first) = polylines.first() else {
        return Ok(Vec::new());
    };
    let k = first.len();
    if k < 2 {
        bail!("need at least two heights per polyline, got {k}");
    }
    if let Some(i) = polylines.iter().position(|l| l.len() != k) {
        bail!("polyline {i} has {} heights, expected {k}", polylines[i].len());
    }
    let mut covered = vec![0.0; polylines.len()];
    for j in 0..k - 1 {
        let mut p = DynamicPolygon::new(0.0, 0.0, 1.0, height)?;
        for (i, l) in polylines.iter().enumerate() {
            let before = p.area();
            p.add(&Line::from_coords(0.0, l[j], 1.0, l[j + 1]));
            covered[i] += before - p.area();
        }
    }
    Ok(covered)
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::code_rev(),
        "crate_version": halfplane::VERSION,
        "tags": tag.into_iter().collect::<Vec<_>>(),
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn read_csv(path: &str, has_header: bool) -> Result<DataFrame> {
    let df = LazyCsvReader::new(path)
        .with_has_header(has_header)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {path}"))?
        .collect()
        .with_context(|| format!("reading {path}"))?;
    tracing::info!(rows = df.height(), cols = df.width(), "input_csv_shape");
    Ok(df)
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let col = df
        .column(name)
        .with_context(|| format!("missing column {name}"))?
        .cast(&DataType::Float64)?;
    col.f64()?
        .into_iter()
        .enumerate()
        .map(|(i, v)| v.with_context(|| format!("null in column {name} at row {i}")))
        .collect()
}
