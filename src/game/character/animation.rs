// Character animation playback

use super::pose::AnimationLabel;

/// Plays one frame sequence at a time with a fractional frame cursor.
///
/// The cursor advances by a per-tick amount (fast for walk cycles,
/// slow breathing for everything else) and wraps to 0 when it reaches
/// the sequence length, so `frame_index` is always in `[0, len)`.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    current: AnimationLabel,
    frame_index: f32,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            current: AnimationLabel::Idle,
            frame_index: 0.0,
        }
    }

    /// Switch to an animation, restarting its frame cursor.
    /// Re-playing the current animation also restarts it, matching the
    /// pose-change contract (a fresh label always resets the cycle).
    pub fn play(&mut self, label: AnimationLabel) {
        self.current = label;
        self.frame_index = 0.0;
    }

    /// Switch without restarting (used for the mid-flight
    /// `JumpUp` -> `JumpDown` apex swap)
    pub fn switch(&mut self, label: AnimationLabel) {
        if self.current != label {
            self.current = label;
            self.frame_index = 0.0;
        }
    }

    /// Advance the frame cursor through a sequence of `len` frames
    pub fn advance(&mut self, amount: f32, len: usize) {
        if len == 0 {
            self.frame_index = 0.0;
            return;
        }
        self.frame_index += amount;
        if self.frame_index >= len as f32 {
            self.frame_index = 0.0;
        }
    }

    pub fn current(&self) -> AnimationLabel {
        self.current
    }

    /// Fractional frame cursor
    pub fn frame_index(&self) -> f32 {
        self.frame_index
    }

    /// The whole frame to display
    pub fn display_frame(&self) -> usize {
        self.frame_index as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let player = AnimationPlayer::new();
        assert_eq!(player.current(), AnimationLabel::Idle);
        assert_eq!(player.display_frame(), 0);
    }

    #[test]
    fn test_play_resets_cursor() {
        let mut player = AnimationPlayer::new();
        player.advance(0.5, 3);
        player.play(AnimationLabel::WalkLeft);
        assert_eq!(player.current(), AnimationLabel::WalkLeft);
        assert_eq!(player.frame_index(), 0.0);
    }

    #[test]
    fn test_advance_wraps_to_zero() {
        let mut player = AnimationPlayer::new();
        player.play(AnimationLabel::WalkRight);
        player.advance(1.5, 3);
        assert_eq!(player.frame_index(), 1.5);
        player.advance(1.5, 3);
        // 3.0 reached: wraps
        assert_eq!(player.frame_index(), 0.0);
    }

    #[test]
    fn test_index_stays_in_range() {
        let mut player = AnimationPlayer::new();
        player.play(AnimationLabel::WalkFront);
        for _ in 0..1000 {
            player.advance(0.12, 3);
            assert!(player.frame_index() >= 0.0);
            assert!(player.frame_index() < 3.0);
        }
    }

    #[test]
    fn test_switch_keeps_cursor_on_same_label() {
        let mut player = AnimationPlayer::new();
        player.play(AnimationLabel::JumpUp);
        player.advance(0.05, 1);
        let before = player.frame_index();
        player.switch(AnimationLabel::JumpUp);
        assert_eq!(player.frame_index(), before);

        player.switch(AnimationLabel::JumpDown);
        assert_eq!(player.current(), AnimationLabel::JumpDown);
        assert_eq!(player.frame_index(), 0.0);
    }

    #[test]
    fn test_empty_sequence_pins_cursor() {
        let mut player = AnimationPlayer::new();
        player.advance(0.12, 0);
        assert_eq!(player.frame_index(), 0.0);
    }
}
