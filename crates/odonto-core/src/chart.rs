//! Chart aggregation: collapsing a tooth's per-surface items into one
//! display status, the surface badge, findings ordering, and the
//! whole-mouth summary. Pure and total — malformed tooth codes are
//! rejected upstream, at the editor, so nothing here can fail.

use crate::models::odontogram::{Odontogram, OdontogramItem, OdontogramStatus};
use crate::models::tooth::{all_teeth, ToothCode, ToothSurface, POSITIONAL_SURFACES};

/// Single display status for a tooth.
///
/// A GENERAL item is authoritative and wins outright. Otherwise the
/// highest-severity status among recorded positional surfaces wins;
/// ties go to the first surface in canonical O, M, D, B, L order. A
/// tooth with no items reads HEALTHY.
pub fn display_status(chart: &Odontogram, tooth: &ToothCode) -> OdontogramStatus {
    if let Some(general) = chart.item(tooth, ToothSurface::General) {
        return general.status;
    }

    let mut best = OdontogramStatus::Healthy;
    for surface in POSITIONAL_SURFACES {
        if let Some(it) = chart.item(tooth, surface)
            && it.status.severity() > best.severity()
        {
            best = it.status;
        }
    }
    best
}

/// Compact badge of the positional surfaces that have findings, in
/// canonical order, joined with `+`. More than three surfaces truncate
/// to the first three with a trailing `+` ("M+D+B+"). `None` when no
/// positional surface has a finding.
pub fn surface_badge(chart: &Odontogram, tooth: &ToothCode) -> Option<String> {
    let present: Vec<&str> = POSITIONAL_SURFACES
        .into_iter()
        .filter(|s| chart.item(tooth, *s).is_some())
        .filter_map(|s| s.letter())
        .collect();

    if present.is_empty() {
        return None;
    }

    let shown = present[..present.len().min(3)].join("+");
    if present.len() > 3 {
        Some(format!("{shown}+"))
    } else {
        Some(shown)
    }
}

/// Per-status tooth counts for the clinical summary panel. Each tooth
/// counts once, under its display status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartSummary {
    pub caries: usize,
    pub fillings: usize,
    pub endodontics: usize,
    pub extracted: usize,
    pub missing: usize,
    pub implants: usize,
    pub crowns: usize,
}

pub fn summarize(chart: &Odontogram) -> ChartSummary {
    let mut summary = ChartSummary::default();
    for tooth in all_teeth() {
        match display_status(chart, &tooth) {
            OdontogramStatus::Caries => summary.caries += 1,
            OdontogramStatus::Filling => summary.fillings += 1,
            OdontogramStatus::Endodontic => summary.endodontics += 1,
            OdontogramStatus::Extracted => summary.extracted += 1,
            OdontogramStatus::Missing => summary.missing += 1,
            OdontogramStatus::Implant => summary.implants += 1,
            OdontogramStatus::Crown => summary.crowns += 1,
            OdontogramStatus::Healthy => {}
        }
    }
    summary
}

/// Findings in presentation order: tooth number ascending, then surface
/// in canonical order, then severity descending.
pub fn sorted_findings(chart: &Odontogram) -> Vec<&OdontogramItem> {
    let mut items: Vec<&OdontogramItem> = chart.items.iter().collect();
    items.sort_by(|a, b| {
        a.tooth_code
            .number()
            .cmp(&b.tooth_code.number())
            .then(a.surface.canonical_order().cmp(&b.surface.canonical_order()))
            .then(b.status.severity().cmp(&a.status.severity()))
    });
    items
}

/// Surface an editor should save to when the chosen status is
/// whole-tooth-only: such statuses are coerced to GENERAL, everything
/// else keeps the requested surface.
pub fn effective_surface(status: OdontogramStatus, requested: ToothSurface) -> ToothSurface {
    if status.requires_general() {
        ToothSurface::General
    } else {
        requested
    }
}
