// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! `text` and `text_mesh`.
//!
//! Both operators lay out the same glyph outlines; `text_mesh` returns them
//! as a 2D mesh, `text` converts that mesh to a solid. Because the solid is
//! derived from the identical outline set, membership in `text(...)` and in
//! `solid() text_mesh(...)` agree pointwise.

use crate::error::{Error, Result};
use crate::eval::args::{ArgSpec, BoundArgs};
use crate::eval::shape::ShapeRep;
use crate::eval::value::Value;
use crate::eval::Evaluator;
use crate::fonts;
use crate::geometry::Mesh2;
use crate::lang::ast::Call;
use nalgebra::{Point2, Vector2};

const TEXT_SPECS: &[ArgSpec] = &[
    ArgSpec::required("text"),
    ArgSpec::optional("size", Value::Number(10.0)),
    ArgSpec::optional("font", Value::Str(String::new())),
    ArgSpec::optional("halign", Value::Str(String::new())),
    ArgSpec::optional("valign", Value::Str(String::new())),
    ArgSpec::optional("spacing", Value::Number(1.0)),
    ArgSpec::optional("segments", Value::Number(8.0)),
];

pub fn text(ev: &mut Evaluator, call: &Call, _: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, TEXT_SPECS)?;
    Ok(ShapeRep::Solid2(layout(&a)?.to_solid()))
}

pub fn text_mesh(ev: &mut Evaluator, call: &Call, _: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, TEXT_SPECS)?;
    Ok(ShapeRep::Mesh2(layout(&a)?))
}

fn layout(a: &BoundArgs) -> Result<Mesh2> {
    let content = a.string("text")?;
    let size = a.num("size")?;
    if size <= 0.0 {
        return Err(Error::eval(a.pos(), "text: size must be positive"));
    }
    let spacing = a.num("spacing")?;
    if spacing <= 0.0 {
        return Err(Error::eval(a.pos(), "text: spacing must be positive"));
    }
    let segments = a.integer("segments")?;
    if segments < 1 {
        return Err(Error::eval(a.pos(), "text: segments must be at least 1"));
    }

    let font = a.string("font")?;
    if !font.is_empty() && !fonts::is_known_font(&font) {
        return Err(Error::eval(a.pos(), format!("text: unsupported font {font:?}")));
    }

    let cell = size / fonts::GLYPH_ROWS as f64;
    let glyph_w = fonts::GLYPH_COLS as f64 * cell;
    let advance = (fonts::GLYPH_COLS + 1) as f64 * cell * spacing;

    let mut segments2 = Vec::new();
    let mut n_glyphs = 0usize;
    for (i, c) in content.chars().enumerate() {
        let Some(rows) = fonts::glyph(c) else {
            return Err(Error::eval(a.pos(), format!("text: unsupported character {c:?}")));
        };
        let x_off = i as f64 * advance;
        for [p, q] in fonts::glyph_outlines(rows) {
            segments2.push([
                Point2::new(p.x * cell + x_off, p.y * cell),
                Point2::new(q.x * cell + x_off, q.y * cell),
            ]);
        }
        n_glyphs += 1;
    }
    if segments2.is_empty() {
        return Err(Error::eval(a.pos(), "text: no outlines produced"));
    }

    let width = (n_glyphs - 1) as f64 * advance + glyph_w;
    let dx = match a.string("halign")?.as_str() {
        "" | "left" => 0.0,
        "center" => -0.5 * width,
        "right" => -width,
        other => return Err(Error::eval(a.pos(), format!("text: unknown halign {other:?}"))),
    };
    let dy = match a.string("valign")?.as_str() {
        "" | "baseline" | "bottom" => 0.0,
        "center" => -0.5 * size,
        "top" => -size,
        other => return Err(Error::eval(a.pos(), format!("text: unknown valign {other:?}"))),
    };

    let shift = Vector2::new(dx, dy);
    for seg in &mut segments2 {
        seg[0] += shift;
        seg[1] += shift;
    }
    Ok(Mesh2::new(segments2))
}
