//! Tick and limit harmonization across several axes.
//!
//! These functions work on any [`Surface`]: Matplotlib [`crate::Axes`] or
//! a test double.  They only touch ticks and limits, never the data.

use log::debug;

use crate::error::{Error, Result};

/// Axis dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dim { X, Y }

impl Dim {
    /// Letter used by Matplotlib method names (`set_xticks`,...).
    pub fn letter(self) -> &'static str {
        match self { Dim::X => "x", Dim::Y => "y" }
    }
}

/// Tick and limit access to one plotting surface.
pub trait Surface {
    /// Tick positions currently set (possibly outside the limits).
    fn ticks(&self, dim: Dim) -> Result<Vec<f64>>;

    fn set_ticks(&mut self, dim: Dim, ticks: &[f64]) -> Result<()>;

    /// View limits `(lo, hi)`; `lo > hi` for an inverted axis.
    fn limits(&self, dim: Dim) -> Result<(f64, f64)>;

    fn set_limits(&mut self, dim: Dim, limits: (f64, f64)) -> Result<()>;

    /// Make `self` follow `leader` along `dim` (pan, zoom, limits).
    fn share(&mut self, dim: Dim, leader: &Self) -> Result<()>;
}

// Relative tolerance under which two tick values are the same tick.
const TICK_EPS: f64 = 1e-9;

fn same_tick(a: f64, b: f64) -> bool {
    (a - b).abs() <= TICK_EPS * 1f64.max(a.abs()).max(b.abs())
}

/// Ticks of `s` lying within its view limits.
fn used_ticks<S: Surface>(s: &S, dim: Dim) -> Result<Vec<f64>> {
    let (a, b) = s.limits(dim)?;
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Ok(s.ticks(dim)?.into_iter()
       .filter(|&t| (t >= lo || same_tick(t, lo)) && (t <= hi || same_tick(t, hi)))
       .collect())
}

/// Sorted union of tick sets, near-equal values being merged.
pub fn tick_union<I, T>(sets: I) -> Vec<f64>
where I: IntoIterator<Item = T>,
      T: IntoIterator<Item = f64> {
    let mut ticks: Vec<f64> = sets.into_iter().flatten()
        .filter(|t| t.is_finite())
        .collect();
    ticks.sort_by(f64::total_cmp);
    ticks.dedup_by(|b, a| same_tick(*a, *b));
    ticks
}

/// Set `ticks` on every handle, keeping each handle's limits.
fn impose_ticks<S: Surface>(handles: &mut [S], dim: Dim, ticks: &[f64])
                            -> Result<()> {
    for h in handles.iter_mut() {
        let limits = h.limits(dim)?;
        h.set_ticks(dim, ticks)?;
        h.set_limits(dim, limits)?;
    }
    Ok(())
}

/// Give all `handles` the union of the ticks they use along `dim`.
/// Limits are left untouched so the data do not move.  Return the
/// ticks that were set.
///
/// The result does not depend on the order of `handles`.
pub fn align_axes<S: Surface>(handles: &mut [S], dim: Dim)
                              -> Result<Vec<f64>> {
    let mut sets = Vec::with_capacity(handles.len());
    for h in handles.iter() {
        sets.push(used_ticks(h, dim)?);
    }
    let ticks = tick_union(sets);
    if ticks.is_empty() {
        return Ok(ticks)
    }
    debug!("aligning {} {}-axes on {} ticks",
           handles.len(), dim.letter(), ticks.len());
    impose_ticks(handles, dim, &ticks)?;
    Ok(ticks)
}

/// Give all `handles` the ticks `values` along `dim`.  `values` must be
/// non-empty, finite and sorted; repeated values give one tick.
pub fn align_axes_on_values<S: Surface>(
    handles: &mut [S], dim: Dim, values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::InvalidValues("no tick value given".into()))
    }
    if let Some(v) = values.iter().find(|v| !v.is_finite()) {
        return Err(Error::InvalidValues(format!("tick value {v} is not finite")))
    }
    if let Some(w) = values.windows(2).find(|w| w[0] > w[1]) {
        return Err(Error::InvalidValues(format!(
            "tick values must be sorted ({} then {})", w[0], w[1])))
    }
    let mut ticks = values.to_vec();
    ticks.dedup_by(|b, a| same_tick(*a, *b));
    impose_ticks(handles, dim, &ticks)
}

/// Set the limits of each handle along `dim` to `[-m, m]` where `m` is
/// the largest absolute value of its current limits, raised to
/// `min_limit` if given.  Ticks are not modified.
pub fn make_axes_symmetric_zero_centered<S: Surface>(
    handles: &mut [S], dim: Dim, min_limit: Option<f64>) -> Result<()> {
    if let Some(l) = min_limit {
        if !l.is_finite() {
            return Err(Error::InvalidValues(format!(
                "the minimal limit {l} is not finite")))
        }
    }
    for h in handles.iter_mut() {
        let (lo, hi) = h.limits(dim)?;
        let mut m = lo.abs().max(hi.abs());
        if let Some(l) = min_limit {
            m = m.max(l.abs());
        }
        h.set_limits(dim, (-m, m))?;
    }
    Ok(())
}

/// Share the `dim` axis of every handle with the first one, so that
/// panning or zooming one of them moves them all.
pub fn link_axes<S: Surface>(handles: &mut [S], dim: Dim) -> Result<()> {
    if let Some((leader, others)) = handles.split_first_mut() {
        for h in others {
            h.share(dim, leader)?;
        }
    }
    Ok(())
}

pub fn link_x_axes<S: Surface>(handles: &mut [S]) -> Result<()> {
    link_axes(handles, Dim::X)
}

pub fn link_y_axes<S: Surface>(handles: &mut [S]) -> Result<()> {
    link_axes(handles, Dim::Y)
}
