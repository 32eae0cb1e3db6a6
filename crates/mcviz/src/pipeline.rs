//! The run itself: load → tools → layout → styles → render.
//!
//! Every stage finishes before the next starts, and any error aborts the
//! whole run; no partial diagram is returned.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use mcviz_core::{Tool, apply_tools, load_event};
use mcviz_error::Result;
use mcviz_layout::LayoutKind;
use mcviz_render::{RenderedEdge, render_layout};
use mcviz_style::{Style, apply_styles};

use crate::options::McvizOptions;
use crate::registry::Registry;

/// Resolved operators for a run.
///
/// Built before anything is loaded, so a bad tool, layout or style spec
/// fails without touching the input.
pub struct Plan {
    pub tools: Vec<Box<dyn Tool>>,
    pub layout: LayoutKind,
    pub styles: Vec<Box<dyn Style>>,
}

impl Plan {
    pub fn configure(registry: &Registry, opts: &McvizOptions) -> Result<Self> {
        let tools = opts
            .tools
            .iter()
            .map(|spec| registry.tool(spec))
            .collect::<Result<Vec<_>>>()?;
        let layout = registry.layout(opts.layout.as_deref())?;
        let styles = opts
            .style_specs()
            .iter()
            .map(|spec| registry.style(spec))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            tools,
            layout,
            styles,
        })
    }
}

/// Run every stage on `input` and return the rendered edges.
pub fn run_pipeline(
    registry: &Registry,
    input: &Path,
    plan: &Plan,
) -> Result<Vec<RenderedEdge>> {
    // 1. Load
    let load_start = Instant::now();
    let graph = load_event(input, registry.loaders())?;
    info!(
        "Loading: {:.3}s ({} vertices, {} particles)",
        load_start.elapsed().as_secs_f64(),
        graph.vertices().len(),
        graph.particles().len()
    );

    // 2. Tools
    let tools_start = Instant::now();
    let view = apply_tools(graph.view(), &plan.tools)?;
    info!(
        "Tools ({}): {:.3}s",
        plan.tools.len(),
        tools_start.elapsed().as_secs_f64()
    );

    // 3. Layout
    let layout_start = Instant::now();
    let mut layout = plan.layout.layout(&view)?;
    info!(
        "Layout {}: {:.3}s ({} nodes, {} edges)",
        plan.layout,
        layout_start.elapsed().as_secs_f64(),
        layout.nodes.len(),
        layout.edges.len()
    );

    // 4. Styles
    let style_start = Instant::now();
    apply_styles(&mut layout, &plan.styles)?;
    info!(
        "Styles ({}): {:.3}s",
        plan.styles.len(),
        style_start.elapsed().as_secs_f64()
    );

    // 5. Geometry
    let render_start = Instant::now();
    let rendered = render_layout(&layout)?;
    info!("Rendering: {:.3}s", render_start.elapsed().as_secs_f64());

    Ok(rendered)
}
