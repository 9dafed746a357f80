//! Gabled cottage: a single front-facing gable with two windows and a door.

use crate::models::{AppliedColors, Section};

use super::shades::ShadeSet;
use super::svg::{self, Element};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 500;

/// Renders the cottage illustration.
pub fn render(colors: &AppliedColors, active: Option<Section>) -> String {
    let paint = |section: Section| colors.get(section).unwrap_or_default().to_hex();
    let shades = ShadeSet::derive(colors);

    let wall = paint(Section::Wall);
    let roof = paint(Section::Roof);
    let frames = paint(Section::Frames);
    let trim = paint(Section::Trim);
    let door = paint(Section::Door);

    let defs = vec![
        Element::linear_gradient(
            "skyGradient",
            ("0%", "0%", "0%", "100%"),
            &[
                ("0%", "#7fa7d0".to_string()),
                ("100%", "#dfe8ef".to_string()),
            ],
        ),
        Element::linear_gradient(
            "wallGradient",
            ("0%", "0%", "0%", "100%"),
            &[
                ("0%", shades.wall_light.to_hex()),
                ("100%", shades.wall_dark.to_hex()),
            ],
        ),
        Element::linear_gradient(
            "roofGradient",
            ("0%", "0%", "0%", "100%"),
            &[
                ("0%", shades.roof_mid.to_hex()),
                ("100%", shades.roof_dark.to_hex()),
            ],
        ),
        Element::linear_gradient(
            "doorGradient",
            ("0%", "0%", "100%", "0%"),
            &[
                ("0%", shades.door_light.to_hex()),
                ("100%", shades.door_dark.to_hex()),
            ],
        ),
        Element::linear_gradient(
            "windowGlass",
            ("0%", "0%", "100%", "100%"),
            &[
                ("0%", "#c4d4e2".to_string()),
                ("100%", "#7890a8".to_string()),
            ],
        ),
    ];

    let body = vec![
        Element::rect(0, 0, WIDTH, HEIGHT).fill("url(#skyGradient)"),
        Element::ellipse(620, 90, 65, 22).fill("#ffffff").opacity("0.6"),
        // Lawn and walkway
        Element::rect(0, 400, WIDTH, 100).fill("#7d9a62"),
        Element::path("M370 400 L430 400 L470 500 L330 500 Z").fill("#c9c2b5"),
        // Chimney sits behind the roof
        Element::rect(480, 130, 36, 80).fill("#8a5a48"),
        Element::group([
            Element::rect(220, 230, 360, 170).fill(&wall),
            Element::rect(220, 230, 360, 170)
                .fill("url(#wallGradient)")
                .opacity("0.3"),
            // Gable face above the wall line
            Element::polygon("240,230 400,135 560,230").fill(&wall),
            Element::polygon("240,230 400,135 560,230")
                .fill(shades.wall_dark.to_hex())
                .opacity("0.15"),
        ])
        .attr("data-section", "wall"),
        Element::group([
            Element::polygon("190,235 400,110 610,235 580,235 400,128 220,235").fill(&roof),
            Element::polygon("190,235 400,110 610,235 580,235 400,128 220,235")
                .fill("url(#roofGradient)")
                .opacity("0.5"),
        ])
        .attr("data-section", "roof"),
        Element::group([
            // Fascia along the rake and corner boards
            Element::polygon("186,238 400,112 614,238 610,235 400,110 190,235").fill(&trim),
            Element::rect(214, 235, 8, 165).fill(&trim),
            Element::rect(578, 235, 8, 165).fill(&trim),
            Element::rect(214, 392, 372, 8).fill(&trim),
        ])
        .attr("data-section", "trim"),
        // Attic vent in the gable
        Element::circle(400, 190, 18).fill(&trim),
        Element::circle(400, 190, 13).fill(shades.wall_dark.to_hex()),
        Element::group([
            Element::rect(370, 300, 60, 100).fill(&door).attr("rx", 2),
            Element::rect(370, 300, 60, 100)
                .fill("url(#doorGradient)")
                .attr("rx", 2),
            Element::rect(382, 312, 36, 30)
                .fill("url(#windowGlass)")
                .attr("rx", 1),
            Element::circle(420, 355, 3).fill("#c0a080"),
        ])
        .attr("data-section", "door"),
        // Door stoop
        Element::rect(360, 398, 80, 6).fill("#a8a096"),
        Element::group([window(250, &frames), window(470, &frames)])
            .attr("data-section", "frames"),
        shrubs(),
    ]
    .into_iter()
    .chain(active.map(highlight).unwrap_or_default())
    .collect();

    svg::document(WIDTH, HEIGHT, "Gabled cottage", defs, body)
}

/// Four-pane window with a sill, left edge at `x`.
fn window(x: i32, frames: &str) -> Element {
    Element::group([
        Element::rect(x, 270, 80, 70).fill(frames).attr("rx", 2),
        Element::rect(x + 5, 275, 70, 60).fill("url(#windowGlass)"),
        Element::line(x + 40, 275, x + 40, 335).stroke(frames, 4),
        Element::line(x + 5, 305, x + 75, 305).stroke(frames, 4),
        Element::rect(x - 4, 340, 88, 6).fill(frames),
    ])
}

fn shrubs() -> Element {
    Element::group([
        Element::ellipse(260, 398, 38, 18).fill("#4f6b45"),
        Element::ellipse(300, 402, 26, 14).fill("#5d7a50"),
        Element::ellipse(540, 398, 38, 18).fill("#4f6b45"),
        Element::ellipse(500, 402, 26, 14).fill("#5d7a50"),
        Element::circle(255, 390, 3).fill("#d06070"),
        Element::circle(545, 392, 3).fill("#d06070"),
    ])
}

fn highlight(active: Section) -> Vec<Element> {
    match active {
        Section::Wall => vec![
            Element::rect(218, 228, 364, 174).highlight(4, "10,5"),
        ],
        Section::Roof => vec![
            Element::polygon("186,238 400,106 614,238").highlight(4, "10,5"),
        ],
        Section::Door => vec![Element::rect(368, 298, 64, 104).highlight(4, "8,4")],
        Section::Frames => vec![
            Element::rect(246, 266, 88, 82).highlight(3, "8,4"),
            Element::rect(466, 266, 88, 82).highlight(3, "8,4"),
        ],
        Section::Trim => vec![
            Element::polygon("182,240 400,108 618,240").highlight(3, "8,4"),
            Element::rect(210, 233, 380, 171).highlight(3, "8,4"),
        ],
        // Not painted on this house
        Section::Garage | Section::Accent => Vec::new(),
    }
}
