//! SVG walkthrough of a sliding-block solution.
//!
//! One board frame per state, laid out left to right in rows of
//! [`SvgOptions::columns`] frames. Each frame but the last is captioned
//! with the next move, which is also drawn as a translucent ghost piece.

use std::fmt::Write as _;

use crate::render::contour::{extrude, svg_path, trace_bitmap, Point};
use crate::render::RenderError;
use crate::worlds::sliding_block::{BlockMove, BlockPosition, SlidingBlockPuzzle};
use slidewise_search::contract::Problem;

const C12: [&str; 12] = [
    "8dd3c7", "ffffb3", "bebada", "fb8072", "80b1d3", "fdb462", "b3de69", "fccde5", "d9d9d9",
    "bc80bd", "ccebc5", "ffed6f",
];
const C20: [&str; 20] = [
    "1f77b4", "aec7e8", "ff7f0e", "ffbb78", "2ca02c", "98df8a", "d62728", "ff9896", "9467bd",
    "c5b0d5", "8c564b", "c49c94", "e377c2", "f7b6d2", "7f7f7f", "c7c7c7", "bcbd22", "dbdb8d",
    "17becf", "9edae5",
];
const SPECTRAL: [&str; 11] = [
    "9e0142", "d53e4f", "f46d43", "fdae61", "fee08b", "ffffbf", "e6f598", "abdda4", "66c2a5",
    "3288bd", "5e4fa2",
];
const PUOR: [&str; 11] = [
    "7f3b08", "b35806", "e08214", "fdb863", "fee0b6", "f7f7f7", "d8daeb", "b2abd2", "8073ac",
    "542788", "2d004b",
];
const D3B: [&str; 20] = [
    "393b79", "5254a3", "6b6ecf", "9c9ede", "637939", "8ca252", "b5cf6b", "cedb9c", "8c6d31",
    "bd9e39", "e7ba52", "e7cb94", "843c39", "ad494a", "d6616b", "e7969c", "7b4173", "a55194",
    "ce6dbd", "de9ed6",
];

/// Names accepted by [`colormap`].
pub const COLORMAP_NAMES: [&str; 5] = ["c12", "c20", "spectral", "puor", "d3b"];

/// Opacity of the ghost piece previewing the next move.
const GHOST_OPACITY: f64 = 0.2;

const STYLE: &str = "<defs><pattern id=\"crosshatch\" patternUnits=\"userSpaceOnUse\" \
x=\"0\" y=\"0\" width=\"5\" height=\"5\"><g style=\"fill:none; stroke:#dde; stroke-width:1\">\
<path d=\"M0,0 l5,5\"/><path d=\"M5,0 l-5,5\"/></g></pattern></defs>\n\
<style>\n/* <![CDATA[ */\n\
.move_text { font-size:11px; font-family:Arial; fill:#0e004a; font-weight:bold; }\n\
.frame { fill: url(#crosshatch) #fff; stroke:#004a00; stroke-width:1; \
stroke-linecap:square; stroke-linejoin:round; }\n\
/* ]]> */\n</style>\n";

/// Hex colours of a named colormap; unknown names fall back to `c12`.
#[must_use]
pub fn colormap(name: &str) -> &'static [&'static str] {
    match name {
        "c20" => &C20,
        "spectral" => &SPECTRAL,
        "puor" => &PUOR,
        "d3b" => &D3B,
        _ => &C12,
    }
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Frames per row.
    pub columns: usize,
    /// Cell width in pixels.
    pub cell_width: u32,
    /// Cell height in pixels.
    pub cell_height: u32,
    /// Frame border, as a fraction of the cell width.
    pub border_width: f64,
    /// Gap around the frame, as a fraction of the cell width.
    pub border_margin: f64,
    /// Caption band above each board, in pixels.
    pub caption_height: f64,
    /// Colormap name, see [`COLORMAP_NAMES`].
    pub colormap: String,
    /// Prefix captions with the move number.
    pub show_turn_numbers: bool,
    /// Pixels each piece outline is pulled in, leaving a seam between
    /// neighbouring pieces.
    pub piece_inset: i32,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            columns: 5,
            cell_width: 20,
            cell_height: 20,
            border_width: 0.1,
            border_margin: 0.05,
            caption_height: 15.0,
            colormap: "c12".to_string(),
            show_turn_numbers: true,
            piece_inset: 1,
        }
    }
}

impl SvgOptions {
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidOptions`] for zero columns or cell
    /// sizes, negative or non-finite spacing, or an inset that would
    /// swallow a cell.
    pub fn validate(&self) -> Result<(), RenderError> {
        let invalid = |detail: String| Err(RenderError::InvalidOptions { detail });
        if self.columns == 0 {
            return invalid("columns must be at least 1".into());
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            return invalid(format!(
                "cell size {}x{} must be positive",
                self.cell_width, self.cell_height
            ));
        }
        for (name, value) in [
            ("border_width", self.border_width),
            ("border_margin", self.border_margin),
            ("caption_height", self.caption_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} must be finite and non-negative, got {value}"));
            }
        }
        let smallest = i64::from(self.cell_width.min(self.cell_height));
        if self.piece_inset < 0 || i64::from(self.piece_inset) * 2 >= smallest {
            return invalid(format!(
                "piece_inset {} must be non-negative and below half a cell",
                self.piece_inset
            ));
        }
        Ok(())
    }
}

struct Frame {
    width: f64,
    height: f64,
    pad: f64,
    margin: f64,
}

/// Render `moves`, applied from `source`, as a standalone SVG document.
///
/// # Errors
///
/// Returns [`RenderError`] if the options are invalid, `source` does not
/// match the puzzle, or a move names a piece the puzzle lacks.
pub fn render_solution(
    puzzle: &SlidingBlockPuzzle,
    source: &BlockPosition,
    moves: &[BlockMove],
    options: &SvgOptions,
) -> Result<String, RenderError> {
    options.validate()?;
    let pieces = puzzle.pieces();
    if source.offsets().len() != pieces.len() {
        return Err(RenderError::PositionMismatch {
            expected: pieces.len(),
            actual: source.offsets().len(),
        });
    }
    if let Some(mv) = moves.iter().find(|mv| {
        !pieces
            .get(usize::from(mv.piece))
            .is_some_and(|piece| !piece.is_empty())
    }) {
        return Err(RenderError::UnknownPiece { piece: mv.piece });
    }

    let colors = colormap(&options.colormap);
    let (cw, ch) = (f64::from(options.cell_width), f64::from(options.cell_height));
    let scale = Point::new(
        i32::try_from(options.cell_width).unwrap_or(i32::MAX),
        i32::try_from(options.cell_height).unwrap_or(i32::MAX),
    );
    let outlines: Vec<String> = pieces
        .iter()
        .map(|piece| {
            let mut chains = trace_bitmap(&piece.bitmap(), piece.width(), scale, true);
            extrude(&mut chains, options.piece_inset, options.piece_inset);
            svg_path(&chains)
        })
        .collect();

    let margin = options.border_margin * cw;
    let pad = options.border_width * cw + margin;
    let frame = Frame {
        width: puzzle.cols() as f64 * cw + pad * 2.0,
        height: puzzle.rows() as f64 * ch + pad * 2.0 + options.caption_height,
        pad,
        margin,
    };
    let frames = moves.len() + 1;
    let across = frames.min(options.columns);
    let down = frames.div_ceil(options.columns);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
         width=\"{}\" height=\"{}\" shape-rendering=\"crispEdges\">",
        frame.width * across as f64,
        frame.height * down as f64
    );
    out.push_str(STYLE);

    let piece_path = |out: &mut String, id: usize, dx: i8, dy: i8, opacity: f64| {
        let _ = write!(
            out,
            "<path d=\"{}\" fill=\"#{}\" opacity=\"{}\" transform=\"translate({},{})\">\
             <title>Piece: \"{}\"</title></path>",
            outlines[id],
            colors[id % colors.len()],
            opacity,
            f64::from(dx) * cw,
            f64::from(dy) * ch,
            id
        );
    };

    let mut position = source.clone();
    for step in 0..frames {
        let (col, row) = (step % options.columns, step / options.columns);
        let next = moves.get(step);
        let _ = write!(
            out,
            "<g transform=\"translate({},{})\">\n  \
             <rect rx=\"5\" ry=\"5\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" class=\"frame\"></rect>\n  \
             <g transform=\"translate({},{})\">",
            frame.width * col as f64,
            frame.height * row as f64,
            frame.margin,
            frame.margin + options.caption_height,
            frame.width - frame.margin * 2.0,
            frame.height - frame.margin * 2.0 - options.caption_height,
            frame.pad,
            frame.pad + options.caption_height,
        );
        for (id, (piece, at)) in pieces.iter().zip(position.offsets()).enumerate() {
            if piece.is_empty() {
                continue;
            }
            out.push_str("\n    ");
            piece_path(&mut out, id, at.dx, at.dy, 1.0);
        }
        if let Some(mv) = next {
            let id = usize::from(mv.piece);
            let at = position.offsets()[id];
            out.push_str("\n    ");
            piece_path(
                &mut out,
                id,
                at.dx.wrapping_add(mv.dx),
                at.dy.wrapping_add(mv.dy),
                GHOST_OPACITY,
            );
        }
        out.push_str("\n  </g>\n");
        if let Some(mv) = next {
            out.push_str("  <text dy=\"1.2em\" dx=\"0.3em\" class=\"move_text\">");
            if options.show_turn_numbers {
                let _ = write!(out, "{}: ", step + 1);
            }
            let _ = writeln!(out, "{mv}</text>");
            position = puzzle.apply(&position, mv);
        }
        out.push_str("</g>\n");
    }
    out.push_str("</svg>\n");
    Ok(out)
}
