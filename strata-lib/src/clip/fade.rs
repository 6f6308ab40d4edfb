//! Linear fade ramps measured in frames.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

/// Linear gain ramp advanced once per mixed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeRamp {
    direction: FadeDirection,
    total_frames: u32,
    elapsed_frames: u32,
}

impl FadeRamp {
    pub fn new(direction: FadeDirection, total_frames: u32) -> Self {
        Self {
            direction,
            total_frames,
            elapsed_frames: 0,
        }
    }

    pub fn fade_in(total_frames: u32) -> Self {
        Self::new(FadeDirection::In, total_frames)
    }

    pub fn fade_out(total_frames: u32) -> Self {
        Self::new(FadeDirection::Out, total_frames)
    }

    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    /// Gain for the current frame.
    pub fn gain(&self) -> f32 {
        if self.total_frames == 0 {
            return match self.direction {
                FadeDirection::In => 1.0,
                FadeDirection::Out => 0.0,
            };
        }
        let progress = self.elapsed_frames.min(self.total_frames) as f32 / self.total_frames as f32;
        match self.direction {
            FadeDirection::In => progress,
            FadeDirection::Out => 1.0 - progress,
        }
    }

    pub fn advance(&mut self) {
        self.elapsed_frames = self.elapsed_frames.saturating_add(1).min(self.total_frames);
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed_frames >= self.total_frames
    }

    pub fn remaining_frames(&self) -> u32 {
        self.total_frames - self.elapsed_frames.min(self.total_frames)
    }
}
