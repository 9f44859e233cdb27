//! Tween timeline for recolor and bar-update transitions.
//!
//! Every animated attribute is a `(element, channel)` pair. Retargeting a
//! pair that is still in flight starts the new tween from whatever the old
//! one currently displays, so rapid attribute changes never jump.

use crate::interaction::ElementId;
use chm_scale::Rgb;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Fill,
    X,
    Y,
    Height,
}

pub type TweenKey = (ElementId, Channel);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenValue {
    Number(f64),
    Color(Rgb),
}

impl TweenValue {
    /// Parse a CSS hex color.
    pub fn color(hex: &str) -> anyhow::Result<Self> {
        Ok(TweenValue::Color(Rgb::parse(hex)?))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            TweenValue::Number(v) => Some(*v),
            TweenValue::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgb> {
        match self {
            TweenValue::Color(c) => Some(*c),
            TweenValue::Number(_) => None,
        }
    }

    fn interpolate(&self, to: &TweenValue, t: f64) -> TweenValue {
        if t >= 1.0 {
            return *to;
        }
        match (self, to) {
            (TweenValue::Number(a), TweenValue::Number(b)) => TweenValue::Number(a + (b - a) * t),
            (TweenValue::Color(a), TweenValue::Color(b)) => TweenValue::Color(a.interpolate(*b, t)),
            // Mismatched kinds cannot blend; hold the start until done.
            _ => *self,
        }
    }
}

/// Cubic in-out easing on `[0, 1]`.
pub fn cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: TweenValue,
    pub to: TweenValue,
    /// Clock time (ms) the tween was scheduled.
    pub scheduled: f64,
    pub delay: f64,
    pub duration: f64,
}

impl Tween {
    /// Eased progress at `now`, 0 before the delay has elapsed.
    pub fn progress(&self, now: f64) -> f64 {
        let elapsed = now - self.scheduled - self.delay;
        if elapsed <= 0.0 {
            return if self.duration <= 0.0 && elapsed == 0.0 { 1.0 } else { 0.0 };
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        cubic_in_out(elapsed / self.duration)
    }

    pub fn sample(&self, now: f64) -> TweenValue {
        self.from.interpolate(&self.to, self.progress(now))
    }

    pub fn end(&self) -> f64 {
        self.scheduled + self.delay + self.duration.max(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    tweens: BTreeMap<TweenKey, Tween>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` to move to `to`. An existing tween on the same key is
    /// superseded and the new one starts from its value at `now`; otherwise
    /// it starts from `from`.
    pub fn retarget(
        &mut self,
        key: TweenKey,
        from: TweenValue,
        to: TweenValue,
        now: f64,
        delay: f64,
        duration: f64,
    ) {
        let start = self
            .tweens
            .get(&key)
            .map(|running| running.sample(now))
            .unwrap_or(from);
        self.tweens.insert(
            key,
            Tween {
                from: start,
                to,
                scheduled: now,
                delay: delay.max(0.0),
                duration,
            },
        );
    }

    /// Displayed value of `key` at `now`, if it was ever animated.
    pub fn sample(&self, key: &TweenKey, now: f64) -> Option<TweenValue> {
        self.tweens.get(key).map(|t| t.sample(now))
    }

    pub fn number(&self, key: &TweenKey, now: f64) -> Option<f64> {
        self.sample(key, now).and_then(|v| v.as_number())
    }

    /// Displayed color as a hex string.
    pub fn color(&self, key: &TweenKey, now: f64) -> Option<String> {
        self.sample(key, now)
            .and_then(|v| v.as_color())
            .map(|c| c.to_string())
    }

    /// Whether any tween is still moving at `now`.
    pub fn is_running(&self, now: f64) -> bool {
        self.tweens.values().any(|t| t.end() > now)
    }

    /// Drop finished tweens. Their final values must already be reflected in
    /// the scene.
    pub fn prune(&mut self, now: f64) {
        self.tweens.retain(|_, t| t.end() > now);
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
