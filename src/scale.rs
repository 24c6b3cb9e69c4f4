use chrono::{DateTime, Duration, FixedOffset, TimeZone};

use crate::model::Commit;

pub const MARGIN_TOP: f64 = 10.0;
pub const MARGIN_RIGHT: f64 = 10.0;
pub const MARGIN_BOTTOM: f64 = 30.0;
pub const MARGIN_LEFT: f64 = 20.0;

pub const MIN_RADIUS: f64 = 2.0;
pub const MAX_RADIUS: f64 = 30.0;

/// Plot surface in pixel coordinates, y growing downward. The usable area is
/// the surface minus fixed margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    pub width: f64,
    pub height: f64,
}

impl PlotFrame {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn left(&self) -> f64 {
        MARGIN_LEFT
    }

    pub fn right(&self) -> f64 {
        (self.width - MARGIN_RIGHT).max(MARGIN_LEFT)
    }

    pub fn top(&self) -> f64 {
        MARGIN_TOP
    }

    pub fn bottom(&self) -> f64 {
        (self.height - MARGIN_BOTTOM).max(MARGIN_TOP)
    }
}

/// Min/max over the finite values only. `None` when nothing finite remains.
pub fn finite_extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut extent: Option<(f64, f64)> = None;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        extent = Some(match extent {
            None => (v, v),
            Some((min, max)) => (min.min(v), max.max(v)),
        });
    }
    extent
}

/// Continuous linear scale. A collapsed domain maps everything to the range
/// midpoint instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { d0: domain.0, d1: domain.1, r0: range.0, r1: range.1 }
    }

    pub fn scale(&self, v: f64) -> f64 {
        if self.d1 == self.d0 {
            return (self.r0 + self.r1) / 2.0;
        }
        self.r0 + (v - self.d0) / (self.d1 - self.d0) * (self.r1 - self.r0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        if self.r1 == self.r0 {
            return self.d0;
        }
        self.d0 + (px - self.r0) / (self.r1 - self.r0) * (self.d1 - self.d0)
    }
}

/// Square-root scale: dot *area* tracks the value, not the radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    s0: f64,
    s1: f64,
    r0: f64,
    r1: f64,
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            s0: domain.0.max(0.0).sqrt(),
            s1: domain.1.max(0.0).sqrt(),
            r0: range.0,
            r1: range.1,
        }
    }

    pub fn scale(&self, v: f64) -> f64 {
        if self.s1 == self.s0 {
            return (self.r0 + self.r1) / 2.0;
        }
        let s = v.max(0.0).sqrt();
        self.r0 + (s - self.s0) / (self.s1 - self.s0) * (self.r1 - self.r0)
    }
}

/// Continuous time scale over fixed-offset timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    d0: DateTime<FixedOffset>,
    d1: DateTime<FixedOffset>,
    r0: f64,
    r1: f64,
}

impl TimeScale {
    pub fn new(domain: (DateTime<FixedOffset>, DateTime<FixedOffset>), range: (f64, f64)) -> Self {
        Self { d0: domain.0, d1: domain.1, r0: range.0, r1: range.1 }
    }

    /// Expand the domain to whole-day boundaries.
    pub fn nice(mut self) -> Self {
        self.d0 = floor_day(self.d0);
        if self.d1 > floor_day(self.d1) {
            self.d1 = floor_day(self.d1) + Duration::days(1);
        }
        self
    }

    pub fn domain(&self) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        (self.d0, self.d1)
    }

    pub fn scale(&self, t: DateTime<FixedOffset>) -> f64 {
        let d0 = self.d0.timestamp_millis() as f64;
        let d1 = self.d1.timestamp_millis() as f64;
        if d1 == d0 {
            return (self.r0 + self.r1) / 2.0;
        }
        self.r0 + (t.timestamp_millis() as f64 - d0) / (d1 - d0) * (self.r1 - self.r0)
    }

    pub fn invert(&self, px: f64) -> DateTime<FixedOffset> {
        if self.r1 == self.r0 {
            return self.d0;
        }
        let d0 = self.d0.timestamp_millis() as f64;
        let d1 = self.d1.timestamp_millis() as f64;
        let millis = d0 + (px - self.r0) / (self.r1 - self.r0) * (d1 - d0);
        let millis = millis.clamp(d0.min(d1), d0.max(d1));
        self.d0
            .offset()
            .timestamp_millis_opt(millis.round() as i64)
            .single()
            .unwrap_or(self.d0)
    }

    /// Roughly `count` ticks on day boundaries across the domain.
    pub fn ticks(&self, count: usize) -> Vec<DateTime<FixedOffset>> {
        let span_days = (self.d1 - self.d0).num_days().max(1);
        let step = (span_days as f64 / count.max(1) as f64).ceil().max(1.0) as i64;

        let mut ticks = Vec::new();
        let mut t = floor_day(self.d0);
        while t <= self.d1 {
            if t >= self.d0 {
                ticks.push(t);
            }
            t = t + Duration::days(step);
        }
        ticks
    }
}

fn floor_day(t: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let offset = *t.offset();
    t.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| offset.from_local_datetime(&naive).single())
        .unwrap_or(t)
}

/// The shared coordinate scales. Rebuilt as one unit whenever the active
/// commit set or the plot frame changes; every renderer and selection test
/// reads the current instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub x: TimeScale,
    pub y: LinearScale,
    pub r: SqrtScale,
    pub frame: PlotFrame,
}

impl Scales {
    pub fn compute(commits: &[Commit], frame: PlotFrame) -> Self {
        let (t0, t1) = match (
            commits.iter().map(|c| c.datetime).min(),
            commits.iter().map(|c| c.datetime).max(),
        ) {
            (Some(min), Some(max)) => (min, max),
            _ => {
                let epoch = chrono::DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset();
                (epoch, epoch)
            }
        };

        let x = TimeScale::new((t0, t1), (frame.left(), frame.right())).nice();

        // Hour 0 sits on the bottom edge; pixel y grows downward.
        let y = LinearScale::new((0.0, 24.0), (frame.bottom(), frame.top()));

        let (min_lines, max_lines) =
            finite_extent(commits.iter().map(|c| c.total_lines as f64)).unwrap_or((0.0, 0.0));
        let r = SqrtScale::new((min_lines, max_lines), (MIN_RADIUS, MAX_RADIUS));

        Self { x, y, r, frame }
    }
}
