//! Confetti shown once when the result screen appears.

use std::time::{Duration, Instant};

use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, style::Color};

pub const CELEBRATION_DURATION: Duration = Duration::from_millis(3000);
pub const BURST_INTERVAL: Duration = Duration::from_millis(250);
const MAX_PARTICLES_PER_SIDE: f32 = 50.0;
const PARTICLE_LIFETIME: Duration = Duration::from_millis(1500);
const GRAVITY: f32 = 0.9;

const COLORS: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
    Color::LightBlue,
];
const GLYPHS: [char; 5] = ['*', '+', '•', '◆', '▪'];

#[derive(Debug, Clone)]
struct Particle {
    /// Position as a fraction of the area, origin top-left.
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    born: Instant,
    color: Color,
    glyph: char,
}

#[derive(Debug, Clone)]
pub struct Celebration {
    started: Instant,
    last_burst: Option<Instant>,
    last_update: Instant,
    particles: Vec<Particle>,
}

impl Celebration {
    pub fn start(now: Instant) -> Self {
        let mut celebration = Self {
            started: now,
            last_burst: None,
            last_update: now,
            particles: Vec::new(),
        };
        celebration.update(now);
        celebration
    }

    /// True while bursts are still spawning or particles are still in the air.
    pub fn is_active(&self, now: Instant) -> bool {
        now.duration_since(self.started) < CELEBRATION_DURATION || !self.particles.is_empty()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn update(&mut self, now: Instant) {
        let dt = now.duration_since(self.last_update).as_secs_f32();
        self.last_update = now;

        for p in &mut self.particles {
            p.vy += GRAVITY * dt;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
        }
        self.particles.retain(|p| {
            now.duration_since(p.born) < PARTICLE_LIFETIME && p.y < 1.2 && (-0.2..1.2).contains(&p.x)
        });

        let elapsed = now.duration_since(self.started);
        if elapsed >= CELEBRATION_DURATION {
            return;
        }
        let due = match self.last_burst {
            None => true,
            Some(last) => now.duration_since(last) >= BURST_INTERVAL,
        };
        if due {
            let time_left = (CELEBRATION_DURATION - elapsed).as_secs_f32();
            let count = (MAX_PARTICLES_PER_SIDE * time_left / CELEBRATION_DURATION.as_secs_f32())
                .round() as usize;
            self.burst(now, count, 0.1..0.3);
            self.burst(now, count, 0.7..0.9);
            self.last_burst = Some(now);
        }
    }

    fn burst(&mut self, now: Instant, count: usize, x_range: std::ops::Range<f32>) {
        let mut rng = rand::thread_rng();
        for _ in 0..count {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(0.1..0.5);
            self.particles.push(Particle {
                x: rng.gen_range(x_range.clone()),
                y: rng.gen_range(-0.2..0.8),
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                born: now,
                color: COLORS[rng.gen_range(0..COLORS.len())],
                glyph: GLYPHS[rng.gen_range(0..GLYPHS.len())],
            });
        }
    }

    /// Paint particles on top of whatever is already in `buf`.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for p in &self.particles {
            if !(0.0..1.0).contains(&p.x) || !(0.0..1.0).contains(&p.y) {
                continue;
            }
            let x = area.x + (p.x * area.width as f32) as u16;
            let y = area.y + (p.y * area.height as f32) as u16;
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(p.glyph).set_fg(p.color);
            }
        }
    }
}
