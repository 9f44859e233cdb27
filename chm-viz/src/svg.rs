//! Static SVG snapshot of the map beside the chart.

use crate::controller::Viz;
use crate::interaction::ElementId;
use std::fmt::Write;

const GRATICULE_FILL: &str = "#cde4f2";
const GRATICULE_STROKE: &str = "#999";
const COUNTRY_FILL: &str = "#e8e4dc";
const CHART_BACKGROUND: &str = "#3a3a3a";
const TITLE_FILL: &str = "white";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the view's final (post-transition) state as one SVG document.
pub fn render_document(viz: &Viz) -> Result<String, std::fmt::Error> {
    let map = viz.map();
    let chart = viz.chart();
    let frame = chart.frame;
    let width = map.width + frame.width;
    let height = map.height.max(frame.height);

    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, height, width, height
    )?;

    writeln!(out, r#"<g class="map">"#)?;
    writeln!(
        out,
        r#"<path class="gratBackground" d="{}" fill="{}"/>"#,
        map.graticule_background, GRATICULE_FILL
    )?;
    writeln!(
        out,
        r#"<path class="gratLines" d="{}" fill="none" stroke="{}" stroke-width="1px" stroke-opacity="0.5"/>"#,
        map.graticule_lines, GRATICULE_STROKE
    )?;
    writeln!(
        out,
        r##"<path class="countries" d="{}" fill="{}" stroke="#fff" stroke-width="0.5px"/>"##,
        map.countries, COUNTRY_FILL
    )?;
    for shape in &map.regions {
        let stroke = viz.stroke(&ElementId::Region(shape.name.clone()));
        let (stroke, stroke_width) = stroke
            .map(|s| (s.stroke.as_str(), s.stroke_width.as_str()))
            .unwrap_or(("none", "0"));
        writeln!(
            out,
            r#"<path class="states {}" d="{}" fill="{}" stroke="{}" stroke-width="{}"><title>{}</title></path>"#,
            shape.class,
            shape.d,
            shape.fill,
            stroke,
            stroke_width,
            escape(&shape.name)
        )?;
    }
    writeln!(out, "</g>")?;

    writeln!(
        out,
        r#"<g class="chart" transform="translate({},0)">"#,
        map.width
    )?;
    writeln!(
        out,
        r#"<rect class="chartBackground" width="{}" height="{}" transform="{}" fill="{}"/>"#,
        frame.inner_width,
        frame.inner_height,
        frame.translate(),
        CHART_BACKGROUND
    )?;
    for bar in &chart.bars {
        writeln!(
            out,
            r#"<rect class="bar {}" x="{}" y="{}" width="{}" height="{}" fill="{}"><title>{}</title></rect>"#,
            bar.class,
            bar.x,
            bar.y,
            bar.width,
            bar.height,
            bar.fill,
            escape(&bar.name)
        )?;
    }
    let [tx, ty] = chart.title_position;
    writeln!(
        out,
        r#"<text class="chartTitle" x="{}" y="{}" fill="{}">{}</text>"#,
        tx,
        ty,
        TITLE_FILL,
        escape(&chart.title)
    )?;
    writeln!(out, r#"<g class="axis" transform="{}">"#, frame.translate())?;
    for tick in &chart.ticks {
        writeln!(
            out,
            r##"<g class="tick" transform="translate(0,{})"><line x2="-6" stroke="#000"/><text x="-9" dy=".32em" text-anchor="end">{}</text></g>"##,
            tick.y, tick.label
        )?;
    }
    writeln!(out, "</g>")?;
    writeln!(
        out,
        r##"<rect class="chartFrame" width="{}" height="{}" transform="{}" fill="none" stroke="#ccc"/>"##,
        frame.inner_width,
        frame.inner_height,
        frame.translate()
    )?;
    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")?;
    Ok(out)
}
