// src/debug/visualization/svg.rs

use crate::math::{
    error::HotspotResult,
    types::{Coord, PolygonRing},
};
use crate::pipeline::output::{MapView, OverlayStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;
use svg::Document;
use svg::node::element::{Circle, Group, Polygon, Rectangle};
use tracing::info;

/// Einstellungen für die Debug-SVG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgOptions {
    /// Breite und Höhe der SVG in Pixeln.
    pub size_px: f64,
    /// Zusätzlich die ungeglätteten Hüllen gestrichelt zeichnen.
    pub draw_hulls: bool,
    /// Rand um die Daten, relativ zur größeren Ausdehnung.
    pub padding_factor: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            size_px: 800.0,
            draw_hulls: false,
            padding_factor: 0.05,
        }
    }
}

/// Ansichtsfenster in Grad: `min` ist die Südwest-Ecke.
#[derive(Debug, Clone, Copy)]
struct ViewBox {
    min: Coord<f64>,
    extent: f64,
}

impl ViewBox {
    /// Quadratisches Fenster um alle Marker und Polygone.
    fn fit(view: &MapView, style: &OverlayStyle, padding_factor: f64) -> Self {
        let coords = view
            .markers
            .iter()
            .map(|p| p.coord())
            .chain(view.overlays.iter().flat_map(|o| o.polygon.vertices().iter().copied()));

        let bounds = coords.fold(None, |acc: Option<(Coord<f64>, Coord<f64>)>, c| {
            Some(match acc {
                None => (c, c),
                Some((min, max)) => (
                    Coord {
                        x: min.x.min(c.x),
                        y: min.y.min(c.y),
                    },
                    Coord {
                        x: max.x.max(c.x),
                        y: max.y.max(c.y),
                    },
                ),
            })
        });

        let (min, max) = bounds.unwrap_or_else(|| {
            let center = Coord {
                x: style.center.1,
                y: style.center.0,
            };
            (center, center)
        });

        // Leere oder punktförmige Daten bekommen ein Fenster von ~1 km
        let extent = (max.x - min.x).max(max.y - min.y).max(0.01);
        let padding = extent * padding_factor;
        let center = Coord {
            x: (min.x + max.x) * 0.5,
            y: (min.y + max.y) * 0.5,
        };
        let extent = extent + 2.0 * padding;

        Self {
            min: Coord {
                x: center.x - extent * 0.5,
                y: center.y - extent * 0.5,
            },
            extent,
        }
    }

    /// SVG-Koordinaten: x = Länge, y = negierte Breite (Norden oben).
    fn project(c: Coord<f64>) -> (f64, f64) {
        (c.x, -c.y)
    }

    fn attribute(&self) -> String {
        format!(
            "{} {} {} {}",
            self.min.x,
            -(self.min.y + self.extent),
            self.extent,
            self.extent
        )
    }
}

fn points_attribute(ring: &PolygonRing) -> String {
    ring.vertices()
        .iter()
        .map(|&c| {
            let (x, y) = ViewBox::project(c);
            format!("{x},{y}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Zeichnet Marker und Cluster-Overlays einer [`MapView`] als SVG-Dokument.
pub fn render_map_view_svg(view: &MapView, style: &OverlayStyle, options: &SvgOptions) -> Document {
    let view_box = ViewBox::fit(view, style, options.padding_factor);
    let point_radius = view_box.extent * 0.004;
    let (bg_x, bg_y) = (view_box.min.x, -(view_box.min.y + view_box.extent));

    let background = Rectangle::new()
        .set("x", bg_x)
        .set("y", bg_y)
        .set("width", view_box.extent)
        .set("height", view_box.extent)
        .set("fill", "#f0f0f0");

    let mut overlays = Group::new().set("class", "overlays");
    for overlay in &view.overlays {
        if options.draw_hulls && overlay.hull.len() >= 3 {
            overlays = overlays.add(
                Polygon::new()
                    .set("class", "hull")
                    .set("points", points_attribute(&overlay.hull))
                    .set("fill", "none")
                    .set("stroke", "#888888")
                    .set("stroke-dasharray", "4,4")
                    .set("vector-effect", "non-scaling-stroke"),
            );
        }
        overlays = overlays.add(
            Polygon::new()
                .set("class", "overlay")
                .set("data-members", overlay.member_count())
                .set("points", points_attribute(&overlay.polygon))
                .set("fill", style.fill_color.as_str())
                .set("fill-opacity", style.fill_opacity)
                .set("stroke", style.stroke_color.as_str())
                .set("stroke-opacity", style.stroke_opacity)
                .set("stroke-width", style.stroke_weight)
                .set("vector-effect", "non-scaling-stroke"),
        );
    }

    let mut markers = Group::new().set("class", "markers");
    for point in &view.markers {
        let (cx, cy) = ViewBox::project(point.coord());
        markers = markers.add(
            Circle::new()
                .set("class", "marker")
                .set("data-id", point.id)
                .set("cx", cx)
                .set("cy", cy)
                .set("r", point_radius)
                .set("fill", style.marker_color.as_str()),
        );
    }

    Document::new()
        .set("width", options.size_px)
        .set("height", options.size_px)
        .set("viewBox", view_box.attribute())
        .add(background)
        .add(overlays)
        .add(markers)
}

/// Speichert die Debug-SVG einer [`MapView`] unter `path`.
pub fn save_map_view_svg(
    path: impl AsRef<Path>,
    view: &MapView,
    style: &OverlayStyle,
    options: &SvgOptions,
) -> HotspotResult<()> {
    let document = render_map_view_svg(view, style, options);
    svg::save(path.as_ref(), &document)?;
    info!(
        path = %path.as_ref().display(),
        overlays = view.overlays.len(),
        markers = view.markers.len(),
        "debug SVG written"
    );
    Ok(())
}
