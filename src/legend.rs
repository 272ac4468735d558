//! Legend placement.
//!
//! Placing a legend so that it neither covers tick labels and axis titles
//! nor gets clipped needs the rendered size of every artist, which is only
//! known after a render pass.  The search in [`place`] is therefore
//! written against the [`Measurer`] trait: Matplotlib implements it in
//! [`crate::mpl`], tests with a fake.

use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::Result;

/// Axis-aligned box in display coordinates (pixels, y pointing up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    /// Box with corners `(x0, y0)` and `(x1, y1)` in any order.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        BBox { x0: x0.min(x1), y0: y0.min(y1),
               x1: x0.max(x1), y1: y0.max(y1) }
    }

    pub fn width(&self) -> f64 { self.x1 - self.x0 }
    pub fn height(&self) -> f64 { self.y1 - self.y0 }

    /// Grow the box by `pad` on every side.
    pub fn inflate(&self, pad: f64) -> Self {
        BBox { x0: self.x0 - pad, y0: self.y0 - pad,
               x1: self.x1 + pad, y1: self.y1 + pad }
    }

    pub fn intersection(&self, other: &BBox) -> Option<BBox> {
        let b = BBox { x0: self.x0.max(other.x0), y0: self.y0.max(other.y0),
                       x1: self.x1.min(other.x1), y1: self.y1.min(other.y1) };
        if b.x0 < b.x1 && b.y0 < b.y1 { Some(b) } else { None }
    }

    pub fn overlap_area(&self, other: &BBox) -> f64 {
        self.intersection(other).map_or(0., |b| b.width() * b.height())
    }

    /// How far `self` sticks out of `outer` on `side` (0 if it does not).
    pub fn excess(&self, outer: &BBox, side: Side) -> f64 {
        let d = match side {
            Side::Left => outer.x0 - self.x0,
            Side::Right => self.x1 - outer.x1,
            Side::Bottom => outer.y0 - self.y0,
            Side::Top => self.y1 - outer.y1,
        };
        d.max(0.)
    }
}

/// Side of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side { Left, Right, Top, Bottom }

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// Anchor point, in frame fraction, of a legend centered on the
    /// middle of this side.
    pub fn anchor(self) -> (f64, f64) {
        match self {
            Side::Left => (0., 0.5),
            Side::Right => (1., 0.5),
            Side::Top => (0.5, 1.),
            Side::Bottom => (0.5, 0.),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }
}

/// Named legend location inside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
    CenterRight,
    CenterLeft,
    LowerCenter,
    UpperCenter,
    Center,
}

impl Anchor {
    /// Order in which locations are tried.
    pub const ALL: [Anchor; 9] = [
        Anchor::UpperRight, Anchor::UpperLeft, Anchor::LowerLeft,
        Anchor::LowerRight, Anchor::CenterRight, Anchor::CenterLeft,
        Anchor::LowerCenter, Anchor::UpperCenter, Anchor::Center];

    /// Matplotlib `loc` string.
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::UpperRight => "upper right",
            Anchor::UpperLeft => "upper left",
            Anchor::LowerLeft => "lower left",
            Anchor::LowerRight => "lower right",
            Anchor::CenterRight => "center right",
            Anchor::CenterLeft => "center left",
            Anchor::LowerCenter => "lower center",
            Anchor::UpperCenter => "upper center",
            Anchor::Center => "center",
        }
    }

    fn next(self) -> Anchor {
        let i = Anchor::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Anchor::ALL[(i + 1) % Anchor::ALL.len()]
    }
}

/// Where a legend should go relative to its frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Centered on a side, outside the frame.
    Outside(Side),
    /// At a named location inside the frame.
    Inside(Anchor),
}

/// Concrete legend location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spot {
    /// Legend centered on this point, in frame fraction.
    Point(f64, f64),
    Named(Anchor),
}

impl Position {
    /// Spot at which the search starts when no shift is requested.
    pub fn start(self) -> Spot {
        match self {
            Position::Outside(side) => {
                let (x, y) = side.anchor();
                Spot::Point(x, y)
            }
            Position::Inside(a) => Spot::Named(a),
        }
    }
}

/// What one render pass reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub legend: BBox,
    /// Tick labels, axis labels and titles the legend must not cover.
    pub obstacles: Vec<BBox>,
    /// Box the legend anchor is expressed in (axes or subfigure).
    pub frame: BBox,
    /// Area saved to file; anything outside is clipped.
    pub canvas: BBox,
}

impl Scene {
    /// Area covered by the legend grown by `pad` and the obstacles.
    pub fn overlap(&self, pad: f64) -> f64 {
        let lgd = self.legend.inflate(pad);
        self.obstacles.iter().fold(0., |a, o| a + lgd.overlap_area(o))
    }

    /// Deepest intrusion of an obstacle into the padded legend, measured
    /// along the direction pointing away from the frame on `side`, plus a
    /// small slack.
    fn penetration(&self, side: Side, pad: f64) -> f64 {
        let lgd = self.legend.inflate(pad);
        self.obstacles.iter()
            .filter(|o| lgd.intersection(o).is_some())
            .map(|o| match side {
                Side::Left => lgd.x1 - o.x0,
                Side::Right => o.x1 - lgd.x0,
                Side::Bottom => lgd.y1 - o.y0,
                Side::Top => o.y1 - lgd.y0,
            })
            .fold(0., f64::max) + NUDGE_SLACK
    }
}

impl BBox {
    /// Size of `self` across `side`: its width for left and right.
    fn extent(&self, side: Side) -> f64 {
        match side {
            Side::Left | Side::Right => self.width(),
            Side::Top | Side::Bottom => self.height(),
        }
    }
}

/// `spot` moved by `px` pixels away from the frame on `side`, towards
/// it when `px` is negative.
fn shifted(spot: Spot, side: Side, px: f64, frame: &BBox) -> Spot {
    let Spot::Point(x, y) = spot else { return spot };
    let w = frame.width().max(1.);
    let h = frame.height().max(1.);
    match side {
        Side::Left => Spot::Point(x - px / w, y),
        Side::Right => Spot::Point(x + px / w, y),
        Side::Bottom => Spot::Point(x, y - px / h),
        Side::Top => Spot::Point(x, y + px / h),
    }
}

// Extra pixels added to each nudge so that boxes left touching do not
// overlap again through rounding.
const NUDGE_SLACK: f64 = 0.5;

/// Render and geometry access needed by [`place`].
pub trait Measurer {
    /// Render and report the current geometry.
    fn measure(&mut self) -> Result<Scene>;

    fn move_legend(&mut self, spot: Spot) -> Result<()>;

    /// Reserve an extra `fraction` of the canvas on `side` so that what
    /// is drawn there is not clipped.  Return `false` if this container
    /// cannot reserve margin (its layout engine handles it).
    fn reserve_margin(&mut self, side: Side, fraction: f64) -> Result<bool>;

    /// Whether reserving margin also moves the legend with the axes.
    /// A legend anchored to the canvas stays put: its axes are the ones
    /// that move away.
    fn legend_follows_margin(&self) -> bool { true }
}

/// Tuning of the placement search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    max_passes: usize,
    tolerance: f64,
    pad: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        PlacementConfig { max_passes: 5, tolerance: 0., pad: 4. }
    }
}

impl PlacementConfig {
    /// Maximum number of render passes (at least 1).
    #[must_use]
    pub fn max_passes(mut self, n: usize) -> Self {
        self.max_passes = n.max(1);
        self
    }

    /// Overlap area (px²) still considered as no overlap.
    #[must_use]
    pub fn tolerance(mut self, t: f64) -> Self {
        if t >= 0. { self.tolerance = t }
        self
    }

    /// Clearance (px) kept between the legend and other artists.
    #[must_use]
    pub fn pad(mut self, pad: f64) -> Self {
        if pad >= 0. { self.pad = pad }
        self
    }

    pub fn get_max_passes(&self) -> usize { self.max_passes }
    pub fn get_tolerance(&self) -> f64 { self.tolerance }
    pub fn get_pad(&self) -> f64 { self.pad }
}

/// Warning attached to a [`Placement`] when no clean location was found.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("legend still overlaps by {overlap:.1} px² or is clipped after \
         {passes} passes; keeping the best location found")]
pub struct PlacementOverflow {
    pub overlap: f64,
    pub passes: usize,
}

/// Outcome of [`place`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub spot: Spot,
    /// Overlap (px²) measured at `spot`.
    pub overlap: f64,
    /// Render passes performed.
    pub passes: usize,
    /// Set when the search gave up.
    pub overflow: Option<PlacementOverflow>,
}

impl Placement {
    pub fn is_clean(&self) -> bool { self.overflow.is_none() }
}

/// Move the legend, starting at `start`, until it overlaps no obstacle
/// and is not clipped, rendering at most `config.max_passes` times.
/// A legend that is already well placed is left where it is.
///
/// A clipped legend that follows its axes gets margin reserved on the
/// clipped side.  A legend anchored to the canvas is pulled back inside
/// instead, and margin is reserved so that the axes clear it.  Margin is
/// no longer reserved on a side where it did not reduce the clipping.
///
/// When the passes are exhausted the location with the least overlap is
/// restored and the returned placement carries a [`PlacementOverflow`].
pub fn place<M: Measurer + ?Sized>(
    m: &mut M, position: Position, start: Spot, config: &PlacementConfig,
) -> Result<Placement> {
    let pad = config.pad;
    let follows = m.legend_follows_margin();
    let mut spot = start;
    let mut best: Option<(f64, Spot)> = None;
    let mut can_reserve = true;
    let mut last_overlap = 0.;
    // Clipping measured when margin was last reserved, per side.
    let mut reserved_for: Vec<(Side, f64)> = vec![];
    for pass in 1 ..= config.max_passes {
        let scene = m.measure()?;
        let overlap = scene.overlap(pad);
        last_overlap = overlap;
        if best.map_or(true, |(o, _)| overlap < o) {
            best = Some((overlap, spot));
        }
        let clipped: Vec<(Side, f64)> = if can_reserve {
            Side::ALL.iter()
                .map(|&s| (s, scene.legend.excess(&scene.canvas, s)))
                .filter(|&(_, e)| e > 0.)
                .collect()
        } else { vec![] };
        debug!("legend placement pass {pass}: {spot:?}, overlap {overlap:.1} \
                px², clipped on {} side(s)", clipped.len());
        if overlap <= config.tolerance && clipped.is_empty() {
            return Ok(Placement { spot, overlap, passes: pass, overflow: None })
        }
        let last_pass = pass == config.max_passes;
        let mut next = spot;
        let mut margin_made = false;
        if follows {
            let previous = std::mem::take(&mut reserved_for);
            for &(side, excess) in &clipped {
                let stuck = previous.iter()
                    .any(|&(s, e)| s == side && excess >= e - NUDGE_SLACK);
                if stuck {
                    warn!("the {} margin does not make room for the legend",
                          side.as_str());
                    can_reserve = false;
                    break
                }
                let extent = scene.canvas.extent(side);
                if extent > 0. && !m.reserve_margin(side, (excess + pad) / extent)? {
                    warn!("cannot reserve a {} margin for the legend",
                          side.as_str());
                    can_reserve = false;
                    break
                }
                reserved_for.push((side, excess));
            }
        } else {
            for &(side, excess) in &clipped {
                next = shifted(next, side, -(excess + pad), &scene.frame);
            }
            match position {
                Position::Outside(side)
                    if overlap > config.tolerance && can_reserve => {
                    let extent = scene.canvas.extent(side);
                    let p = scene.penetration(side, pad);
                    if extent > 0. && m.reserve_margin(side, p / extent)? {
                        margin_made = true;
                    } else {
                        warn!("cannot reserve a {} margin for the legend",
                              side.as_str());
                        can_reserve = false;
                    }
                }
                _ => (),
            }
        }
        if overlap > config.tolerance && !margin_made && !last_pass {
            next = match (position, next) {
                (Position::Outside(side), Spot::Point(..)) =>
                    shifted(next, side, scene.penetration(side, pad),
                            &scene.frame),
                (_, Spot::Named(a)) => Spot::Named(a.next()),
                (Position::Inside(a), Spot::Point(..)) => Spot::Named(a),
            };
        }
        if next != spot && !last_pass {
            m.move_legend(next)?;
            spot = next;
        }
    }
    let passes = config.max_passes;
    let (overlap, best_spot) = best.unwrap_or((last_overlap, spot));
    if best_spot != spot {
        m.move_legend(best_spot)?;
    }
    let overflow = PlacementOverflow { overlap, passes };
    warn!("{overflow}");
    Ok(Placement { spot: best_spot, overlap, passes, overflow: Some(overflow) })
}

/// Remove duplicated labels.  Each label keeps the position of its first
/// occurrence and the handle of its last one.
pub fn dedup_legend_items<H>(items: impl IntoIterator<Item = (H, String)>)
                             -> Vec<(H, String)> {
    let mut by_label: IndexMap<String, H> = IndexMap::new();
    for (h, label) in items {
        by_label.insert(label, h);
    }
    by_label.into_iter().map(|(label, h)| (h, label)).collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    /// What reserving margin does to the fake scene.
    #[derive(Clone, Copy)]
    enum Margin {
        /// The canvas grows, the legend moves with the axes.
        GrowsCanvas,
        /// The axes and their obstacles shrink away from the side.
        ShrinksAxes,
        /// Reported as done, changes nothing.
        Ineffective,
    }

    /// Axes frame at (100, 100)–(500, 400) in a 600 × 500 canvas; the
    /// legend is a fixed size box centered on the anchor point.
    struct FakeScene {
        size: (f64, f64),
        spot: Spot,
        frame: BBox,
        /// Legend box that ignores moves.
        pinned: Option<BBox>,
        obstacles: Vec<BBox>,
        canvas: BBox,
        can_reserve: bool,
        margin: Margin,
        follows: bool,
        measures: usize,
        moves: Vec<Spot>,
        reserved: Vec<(Side, f64)>,
    }

    const FRAME: BBox = BBox { x0: 100., y0: 100., x1: 500., y1: 400. };

    impl FakeScene {
        fn new(spot: Spot, obstacles: Vec<BBox>) -> Self {
            FakeScene { size: (80., 40.), spot, frame: FRAME, pinned: None,
                        obstacles,
                        canvas: BBox::new(0., 0., 600., 500.),
                        can_reserve: true, margin: Margin::GrowsCanvas,
                        follows: true,
                        measures: 0, moves: vec![], reserved: vec![] }
        }

        /// Legend anchored to a 640 × 480 canvas that is also its frame.
        fn on_canvas(spot: Spot, obstacles: Vec<BBox>) -> Self {
            let canvas = BBox::new(0., 0., 640., 480.);
            FakeScene { size: (120., 30.), frame: canvas, canvas,
                        margin: Margin::ShrinksAxes, follows: false,
                        ..FakeScene::new(spot, obstacles) }
        }

        fn legend(&self) -> BBox {
            if let Some(b) = self.pinned { return b }
            let f = self.frame;
            let (cx, cy) = match self.spot {
                Spot::Point(x, y) => (f.x0 + x * f.width(),
                                      f.y0 + y * f.height()),
                Spot::Named(Anchor::UpperRight) => (450., 370.),
                Spot::Named(Anchor::UpperLeft) => (150., 370.),
                Spot::Named(_) => (300., 250.),
            };
            let (w, h) = self.size;
            BBox::new(cx - w / 2., cy - h / 2., cx + w / 2., cy + h / 2.)
        }
    }

    impl Measurer for FakeScene {
        fn measure(&mut self) -> Result<Scene> {
            self.measures += 1;
            Ok(Scene { legend: self.legend(), obstacles: self.obstacles.clone(),
                       frame: self.frame, canvas: self.canvas })
        }

        fn move_legend(&mut self, spot: Spot) -> Result<()> {
            self.spot = spot;
            self.moves.push(spot);
            Ok(())
        }

        fn reserve_margin(&mut self, side: Side, fraction: f64) -> Result<bool> {
            if !self.can_reserve { return Ok(false) }
            self.reserved.push((side, fraction));
            let extra = fraction * self.canvas.extent(side);
            match self.margin {
                Margin::GrowsCanvas => match side {
                    Side::Left => self.canvas.x0 -= extra,
                    Side::Right => self.canvas.x1 += extra,
                    Side::Bottom => self.canvas.y0 -= extra,
                    Side::Top => self.canvas.y1 += extra,
                },
                Margin::ShrinksAxes => for o in &mut self.obstacles {
                    match side {
                        Side::Left => { o.x0 += extra; o.x1 += extra }
                        Side::Right => { o.x0 -= extra; o.x1 -= extra }
                        Side::Bottom => { o.y0 += extra; o.y1 += extra }
                        Side::Top => { o.y0 -= extra; o.y1 -= extra }
                    }
                },
                Margin::Ineffective => (),
            }
            Ok(true)
        }

        fn legend_follows_margin(&self) -> bool { self.follows }
    }

    fn xtick_labels() -> BBox { BBox::new(100., 70., 500., 98.) }

    #[test]
    fn bbox_geometry() {
        let a = BBox::new(10., 10., 0., 0.);
        assert_eq!(a, BBox { x0: 0., y0: 0., x1: 10., y1: 10. });
        let b = BBox::new(5., 5., 20., 20.);
        assert_eq!(a.overlap_area(&b), 25.);
        assert_eq!(a.intersection(&BBox::new(10., 0., 20., 10.)), None);
        assert_eq!(b.excess(&a, Side::Right), 10.);
        assert_eq!(b.excess(&a, Side::Left), 0.);
    }

    #[test]
    fn nothing_to_avoid_means_no_move() -> Result<()> {
        let start = Position::Inside(Anchor::UpperRight).start();
        let mut m = FakeScene::new(start, vec![]);
        let p = place(&mut m, Position::Inside(Anchor::UpperRight), start,
                      &PlacementConfig::default())?;
        assert_eq!(p, Placement { spot: start, overlap: 0., passes: 1,
                                  overflow: None });
        assert!(p.overlap.is_sign_positive());
        assert_eq!(m.measures, 1);
        assert!(m.moves.is_empty());
        Ok(())
    }

    #[test]
    fn placing_twice_is_idempotent() -> Result<()> {
        let pos = Position::Outside(Side::Bottom);
        let mut m = FakeScene::new(pos.start(), vec![xtick_labels()]);
        let cfg = PlacementConfig::default();
        let first = place(&mut m, pos, pos.start(), &cfg)?;
        assert!(first.is_clean());
        let moves = m.moves.len();
        let again = place(&mut m, pos, first.spot, &cfg)?;
        assert_eq!(again.spot, first.spot);
        assert_eq!(again.passes, 1);
        assert_eq!(m.moves.len(), moves);
        Ok(())
    }

    #[test]
    fn bottom_legend_moves_below_tick_labels() -> Result<()> {
        let pos = Position::Outside(Side::Bottom);
        let mut m = FakeScene::new(pos.start(), vec![xtick_labels()]);
        let p = place(&mut m, pos, pos.start(), &PlacementConfig::default())?;
        assert!(p.is_clean(), "{p:?}");
        let Spot::Point(x, y) = p.spot else { panic!("{p:?}") };
        assert_eq!(x, 0.5);
        assert!(y < 0.);
        let lgd = m.legend();
        assert!(lgd.y1 + 4. <= 70. + 1e-9, "{lgd:?}");
        assert_eq!(m.measures, 2);
        Ok(())
    }

    #[test]
    fn right_legend_clears_labels_and_reserves_margin() -> Result<()> {
        let pos = Position::Outside(Side::Right);
        let labels = BBox::new(502., 100., 540., 400.);
        let mut m = FakeScene::new(pos.start(), vec![labels]);
        m.canvas = BBox::new(0., 0., 560., 500.);
        let p = place(&mut m, pos, pos.start(), &PlacementConfig::default())?;
        assert!(p.is_clean(), "{p:?}");
        assert!(!m.reserved.is_empty());
        assert!(m.reserved.iter().all(|(s, f)| *s == Side::Right && *f > 0.));
        assert_eq!(m.legend().excess(&m.canvas, Side::Right), 0.);
        Ok(())
    }

    #[test]
    fn inside_legend_tries_other_locations() -> Result<()> {
        let pos = Position::Inside(Anchor::UpperRight);
        let blocker = BBox::new(400., 340., 500., 400.);
        let mut m = FakeScene::new(pos.start(), vec![blocker]);
        let p = place(&mut m, pos, pos.start(), &PlacementConfig::default())?;
        assert_eq!(p.spot, Spot::Named(Anchor::UpperLeft));
        assert!(p.is_clean());
        Ok(())
    }

    #[test]
    fn gives_up_with_best_location() -> Result<()> {
        let pos = Position::Inside(Anchor::UpperRight);
        let everywhere = BBox::new(0., 0., 600., 500.);
        let mut m = FakeScene::new(pos.start(), vec![everywhere]);
        let cfg = PlacementConfig::default().max_passes(3);
        let p = place(&mut m, pos, pos.start(), &cfg)?;
        assert_eq!(p.passes, 3);
        assert_eq!(m.measures, 3);
        let overflow = p.overflow.expect("overflow reported");
        assert_eq!(overflow.passes, 3);
        assert!(overflow.overlap > 0.);
        assert_eq!(m.spot, p.spot, "best spot restored");
        Ok(())
    }

    #[test]
    fn clipping_without_margin_support_is_ignored() -> Result<()> {
        let pos = Position::Outside(Side::Bottom);
        let mut m = FakeScene::new(pos.start(), vec![]);
        m.canvas = BBox::new(0., 95., 600., 500.);
        m.can_reserve = false;
        let cfg = PlacementConfig::default().max_passes(2);
        let p = place(&mut m, pos, pos.start(), &cfg)?;
        assert_eq!(p.passes, 2);
        assert!(p.is_clean());
        Ok(())
    }

    #[test]
    fn canvas_anchored_legend_is_pulled_inside() -> Result<()> {
        let pos = Position::Outside(Side::Bottom);
        let start = Spot::Point(0.5, 0.);
        let tick_labels = BBox::new(100., 30., 540., 50.);
        let mut m = FakeScene::on_canvas(start, vec![tick_labels]);
        let p = place(&mut m, pos, start, &PlacementConfig::default())?;
        assert!(p.is_clean(), "{p:?}");
        assert_eq!(p.passes, 3);
        let lgd = m.legend();
        assert!(lgd.y0 >= m.canvas.y0, "{lgd:?}");
        assert_eq!(m.reserved.len(), 1);
        assert_eq!(m.reserved[0].0, Side::Bottom);
        assert!(lgd.inflate(4.).y1 < m.obstacles[0].y0, "{:?}", m.obstacles);
        Ok(())
    }

    #[test]
    fn margin_that_does_not_unclip_is_reserved_once() -> Result<()> {
        let pos = Position::Outside(Side::Bottom);
        let mut m = FakeScene::new(pos.start(), vec![]);
        m.canvas = BBox::new(0., 0., 640., 480.);
        m.pinned = Some(BBox::new(260., -15., 380., 15.));
        m.margin = Margin::Ineffective;
        let p = place(&mut m, pos, pos.start(), &PlacementConfig::default())?;
        assert_eq!(m.reserved.len(), 1, "{:?}", m.reserved);
        assert!(p.is_clean(), "{p:?}");
        assert_eq!(p.overlap, 0.);
        assert!(p.overlap.is_sign_positive());
        Ok(())
    }

    #[test]
    fn overflow_message() {
        let o = PlacementOverflow { overlap: 12.345, passes: 5 };
        assert_eq!(o.to_string(),
                   "legend still overlaps by 12.3 px² or is clipped after 5 \
                    passes; keeping the best location found");
    }

    #[test]
    fn tolerance_accepts_small_overlap() -> Result<()> {
        let pos = Position::Outside(Side::Bottom);
        let tiny = BBox::new(299., 118., 300., 119.);
        let mut m = FakeScene::new(pos.start(), vec![tiny]);
        let cfg = PlacementConfig::default().tolerance(2.);
        let p = place(&mut m, pos, pos.start(), &cfg)?;
        assert_eq!(p.passes, 1);
        assert!(p.overlap > 0.);
        Ok(())
    }

    #[test]
    fn dedup_keeps_first_position_and_last_handle() {
        let items = vec![(1, "a".to_string()), (2, "b".to_string()),
                         (3, "a".to_string()), (4, "c".to_string())];
        assert_eq!(dedup_legend_items(items),
                   [(3, "a".to_string()), (2, "b".to_string()),
                    (4, "c".to_string())]);
    }
}
