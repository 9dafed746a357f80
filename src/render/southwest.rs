//! Southwest stucco house: hip roofs, attached garage and a stone accent band.

use crate::models::{AppliedColors, Section};

use super::shades::ShadeSet;
use super::svg::{self, Element};

const WIDTH: u32 = 900;
const HEIGHT: u32 = 500;

/// Renders the southwest illustration.
pub fn render(colors: &AppliedColors, active: Option<Section>) -> String {
    let paint = |section: Section| colors.get(section).unwrap_or_default().to_hex();
    let shades = ShadeSet::derive(colors);

    let wall = paint(Section::Wall);
    let roof = paint(Section::Roof);
    let frames = paint(Section::Frames);
    let trim = paint(Section::Trim);
    let accent = paint(Section::Accent);
    let door = paint(Section::Door);
    let accent_dark = shades.accent_dark.to_hex();
    let garage_dark = shades.garage_dark.to_hex();
    let wall_dark = shades.wall_dark.to_hex();

    let body = vec![
        // Sky and clouds
        Element::rect(0, 0, WIDTH, HEIGHT).fill("url(#skyGradient)"),
        Element::ellipse(150, 80, 60, 25).fill("#c8b8a8").opacity("0.4"),
        Element::ellipse(180, 70, 45, 20).fill("#d0c0b0").opacity("0.3"),
        Element::ellipse(700, 60, 70, 22).fill("#c5b5a5").opacity("0.35"),
        background_trees(),
        // Gravel ground and concrete driveway
        Element::rect(0, 380, WIDTH, 120).fill("url(#gravelPattern)"),
        Element::rect(0, 380, WIDTH, 120).fill("#6b6560").opacity("0.3"),
        Element::path("M100 380 L280 380 L300 500 L80 500 Z").fill("#9a9590"),
        Element::path("M100 380 L280 380 L300 500 L80 500 Z")
            .fill("#a5a09a")
            .opacity("0.5"),
        // Landscaping rocks
        Element::ellipse(400, 410, 25, 12).fill("#c8c0b5"),
        Element::ellipse(500, 405, 18, 10).fill("#d5cdc2"),
        Element::ellipse(580, 415, 22, 11).fill("#bab2a8"),
        // Main stucco wall
        Element::group([
            Element::rect(280, 230, 380, 150).fill(&wall),
            Element::rect(280, 230, 380, 150)
                .fill("url(#wallGradientMain)")
                .opacity("0.3"),
        ])
        .attr("data-section", "wall"),
        // Stone accent band with mortar joints
        Element::group(
            [
                Element::rect(280, 350, 380, 30).fill(&accent),
                Element::rect(280, 350, 380, 30).fill(&accent_dark).opacity("0.2"),
            ]
            .into_iter()
            .chain([320, 380, 450, 520, 590].into_iter().map(|x| {
                Element::line(x, 350, x, 380)
                    .stroke(&accent_dark, 1)
                    .opacity("0.3")
            })),
        )
        .attr("data-section", "accent"),
        // Garage wing wall
        Element::group([
            Element::rect(100, 250, 180, 130).fill(&wall),
            Element::rect(100, 250, 180, 130)
                .fill("url(#wallGradientMain)")
                .opacity("0.3"),
            Element::polygon("100,250 100,380 80,400 80,270").fill("url(#wallGradientSide)"),
        ]),
        // Main hip roof with fascia
        Element::group([
            Element::polygon("260,230 470,140 680,230").fill(&roof),
            Element::polygon("260,230 470,140 680,230")
                .fill("url(#roofGradient)")
                .opacity("0.5"),
            Element::polygon("255,233 470,138 685,233 680,230 470,142 260,230").fill(&trim),
        ])
        .attr("data-section", "roof"),
        // Garage hip roof with fascia
        Element::group([
            Element::polygon("80,250 190,180 300,250").fill(&roof),
            Element::polygon("80,250 190,180 300,250")
                .fill("url(#roofGradient)")
                .opacity("0.5"),
            Element::polygon("75,253 190,178 305,253 300,250 190,182 80,250").fill(&trim),
        ]),
        // Connecting roof section
        Element::polygon("280,230 310,200 340,230").fill(&roof),
        garage_door(&garage_dark),
        // Wall sconces by the garage
        Element::rect(108, 295, 8, 12).fill("#3a3530").attr("rx", 1),
        Element::rect(264, 295, 8, 12).fill("#3a3530").attr("rx", 1),
        // Entry alcove and front door
        Element::group([
            Element::rect(295, 270, 50, 110).fill(&wall_dark),
            Element::rect(305, 285, 35, 95).fill(&door).attr("rx", 1),
            Element::rect(305, 285, 35, 95)
                .fill("url(#doorGradient)")
                .attr("rx", 1),
            Element::rect(312, 295, 21, 50)
                .fill("url(#windowGlass)")
                .attr("rx", 1),
            Element::circle(330, 350, 3).fill("#c0a080"),
            Element::rect(340, 290, 6, 10).fill("#3a3530").attr("rx", 1),
        ])
        .attr("data-section", "door"),
        Element::group([window(370, &frames), window(510, &frames)]).attr("data-section", "frames"),
        landscaping(),
        // Pathway lights
        Element::rect(330, 400, 4, 15).fill("#4a4540"),
        Element::ellipse(332, 398, 4, 2).fill("#e0d080").opacity("0.6"),
        Element::rect(600, 405, 4, 12).fill("#4a4540"),
        Element::ellipse(602, 403, 4, 2).fill("#e0d080").opacity("0.6"),
        // Block wall in the background
        Element::rect(0, 340, 70, 60).fill("#9a6050"),
        Element::rect(0, 340, 70, 60).fill("#8a5545").opacity("0.3"),
    ]
    .into_iter()
    .chain(active.map(highlight).unwrap_or_default())
    .collect();

    svg::document(WIDTH, HEIGHT, "Southwest stucco house", defs(colors, &shades), body)
}

fn defs(colors: &AppliedColors, shades: &ShadeSet) -> Vec<Element> {
    let garage = colors.get(Section::Garage).unwrap_or_default().to_hex();
    let vertical = ("0%", "0%", "0%", "100%");
    let horizontal = ("0%", "0%", "100%", "0%");

    vec![
        Element::linear_gradient(
            "skyGradient",
            vertical,
            &[
                ("0%", "#4a6fa5".to_string()),
                ("40%", "#8da4c7".to_string()),
                ("70%", "#c9b8a8".to_string()),
                ("100%", "#d4c4b0".to_string()),
            ],
        ),
        Element::linear_gradient(
            "wallGradientMain",
            vertical,
            &[
                ("0%", shades.wall_light.to_hex()),
                ("100%", shades.wall_dark.to_hex()),
            ],
        ),
        Element::linear_gradient(
            "wallGradientSide",
            horizontal,
            &[
                ("0%", shades.wall_dark.to_hex()),
                ("100%", shades.wall_side.to_hex()),
            ],
        ),
        Element::linear_gradient(
            "roofGradient",
            vertical,
            &[
                ("0%", shades.roof_mid.to_hex()),
                ("100%", shades.roof_dark.to_hex()),
            ],
        ),
        Element::linear_gradient(
            "windowGlass",
            ("0%", "0%", "100%", "100%"),
            &[
                ("0%", "#b8c8d8".to_string()),
                ("50%", "#8a9eb5".to_string()),
                ("100%", "#6a8098".to_string()),
            ],
        ),
        Element::linear_gradient(
            "garageGradient",
            vertical,
            &[("0%", garage), ("100%", shades.garage_dark.to_hex())],
        ),
        Element::linear_gradient(
            "doorGradient",
            horizontal,
            &[
                ("0%", shades.door_light.to_hex()),
                ("100%", shades.door_dark.to_hex()),
            ],
        ),
        Element::new("pattern")
            .attr("id", "gravelPattern")
            .attr("patternUnits", "userSpaceOnUse")
            .attr("width", 8)
            .attr("height", 8)
            .children([
                Element::rect(0, 0, 8, 8).fill("#6b6560"),
                Element::circle(2, 2, 1.5).fill("#7a756f"),
                Element::circle(6, 5, 1.2).fill("#5d5855"),
                Element::circle(4, 7, 1).fill("#787370"),
            ]),
    ]
}

fn background_trees() -> Element {
    Element::group([
        Element::ellipse(80, 260, 55, 70).fill("#4a5a48"),
        Element::ellipse(90, 250, 45, 55).fill("#5a6a55"),
        Element::rect(75, 310, 15, 50).fill("#5a4a3a"),
        Element::ellipse(820, 270, 50, 65).fill("#4a5848"),
        Element::ellipse(800, 260, 40, 50).fill("#5a6855"),
        Element::rect(795, 310, 12, 45).fill("#5a4a3a"),
    ])
    .opacity("0.7")
}

/// Sectional garage door: gradient slab, 4x4 panel grid and frame.
fn garage_door(garage_dark: &str) -> Element {
    let panels = (0..4).flat_map(|row| {
        (0..4).map(move |col| {
            Element::rect(125 + col * 33, 285 + row * 23, 28, 18)
                .attr("rx", 1)
                .fill(garage_dark)
                .opacity("0.15")
        })
    });

    Element::group(
        std::iter::once(
            Element::rect(120, 280, 140, 100)
                .attr("rx", 3)
                .fill("url(#garageGradient)"),
        )
        .chain(panels)
        .chain(std::iter::once(
            Element::rect(120, 280, 140, 100)
                .attr("rx", 3)
                .fill("none")
                .stroke(garage_dark, 2)
                .opacity("0.3"),
        )),
    )
    .attr("data-section", "garage")
}

/// Large window with blinds and a center divider, left edge at `x`.
fn window(x: i32, frames: &str) -> Element {
    let blinds = (0..8).map(|i| {
        let y = 278.0 + f64::from(i) * 6.5;
        Element::line(x + 6, y, x + 84, y)
            .stroke("#d5dce5", 2)
            .opacity("0.7")
    });

    Element::group(
        [
            Element::rect(x, 270, 90, 65).fill(frames).attr("rx", 2),
            Element::rect(x + 5, 275, 80, 55).fill("url(#windowGlass)"),
        ]
        .into_iter()
        .chain(blinds)
        .chain(std::iter::once(
            Element::line(x + 50, 275, x + 50, 330).stroke(frames, 4),
        )),
    )
}

fn landscaping() -> Element {
    Element::group([
        // Ornamental grasses left of the entry
        Element::ellipse(355, 375, 20, 12).fill("#7a8a60"),
        Element::ellipse(355, 368, 15, 8).fill("#8a9a70"),
        // Blue agave
        Element::ellipse(640, 378, 18, 10).fill("#6a8090"),
        Element::path("M625 378 Q640 355 655 378").fill("#7090a0"),
        // Small shrubs
        Element::ellipse(420, 385, 15, 8).fill("#7a8560"),
        Element::ellipse(550, 388, 12, 7).fill("#6a7555"),
        // Yellow flowering bush
        Element::ellipse(470, 382, 14, 9).fill("#6a7a55"),
        Element::circle(465, 378, 3).fill("#d4a040"),
        Element::circle(472, 376, 2.5).fill("#e0b050"),
        Element::circle(478, 379, 2).fill("#d4a040"),
        // Red accent plant
        Element::ellipse(700, 385, 16, 9).fill("#5a6a50"),
        Element::circle(695, 380, 4).fill("#c04040"),
        Element::circle(705, 382, 3).fill("#d05050"),
    ])
}

/// Hand-placed dashed outlines for the active section.
fn highlight(active: Section) -> Vec<Element> {
    match active {
        Section::Wall => vec![
            Element::rect(278, 228, 384, 124).highlight(4, "10,5"),
            Element::rect(98, 248, 184, 134).highlight(4, "10,5"),
        ],
        Section::Roof => vec![
            Element::polygon("258,232 470,138 682,232").highlight(4, "10,5"),
            Element::polygon("78,252 190,178 302,252").highlight(4, "10,5"),
        ],
        Section::Door => vec![Element::rect(303, 283, 39, 99).highlight(4, "8,4")],
        Section::Frames => vec![
            Element::rect(368, 268, 94, 69).highlight(3, "8,4"),
            Element::rect(508, 268, 94, 69).highlight(3, "8,4"),
        ],
        Section::Trim => vec![
            Element::polygon("253,235 470,136 687,235 680,230 470,144 260,230").highlight(4, "10,5"),
        ],
        Section::Garage => vec![Element::rect(118, 278, 144, 104).highlight(4, "10,5")],
        Section::Accent => vec![Element::rect(278, 348, 384, 34).highlight(4, "10,5")],
    }
}
