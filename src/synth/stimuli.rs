//! Stimulus minting.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::StimulusConfig;
use crate::model::{Stimulus, StimulusKind};

/// Anything that can mint a fresh stimulus.
///
/// The only contract is that consecutive results are distinct enough for a
/// trial's stimulus count; the synthesizer re-mints on collisions.
pub trait StimulusSource {
    fn mint(&mut self) -> Stimulus;
}

impl<F> StimulusSource for F
where
    F: FnMut() -> Stimulus,
{
    fn mint(&mut self) -> Stimulus {
        self()
    }
}

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const EMOJI: &[&str] = &[
    "🌟", "🎨", "🎭", "🎪", "🎯", "🎲", "🎸", "🎹", "🎺", "🎻", "🌈", "🌊", "🌙", "⭐", "🔥",
    "💎", "🌸", "🌺", "🌻", "🌼", "🍀", "🍁", "🍂", "🍃", "🎈", "🎉", "🎊", "🎁", "🏆", "⚡",
    "💫", "✨", "🌠", "🔮", "💝", "🎀", "🌹", "🦋", "🐝", "🐞", "🦄", "🐉", "🦊", "🐺", "🦁",
    "🐯", "🐻", "🐼", "🐨", "🐸", "🦉", "🦅", "🦆", "🦢", "🐧", "🐙", "🦑", "🦀", "🐠", "🐡",
    "🐬", "🐳", "🦈", "🍎", "🍊", "🍋", "🍌", "🍉", "🍇", "🍓", "🫐", "🍒", "🍑", "🥭", "🍍",
];

const IMAGE_STYLES: &[&str] = &["voronoi", "mandelbrot"];
const PULSE_MS: &[u32] = &[100, 200, 300, 400];

/// Default source: picks a kind uniformly from the configured kinds.
pub struct StimulusFactory<R = StdRng> {
    kinds: Vec<StimulusKind>,
    word_length: usize,
    rng: R,
}

impl StimulusFactory<StdRng> {
    pub fn new(config: &StimulusConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> StimulusFactory<R> {
    pub fn with_rng(config: &StimulusConfig, rng: R) -> Self {
        let mut kinds: Vec<StimulusKind> = config.kinds.iter().copied().collect();
        if kinds.is_empty() {
            kinds.push(StimulusKind::Word);
        }
        Self { kinds, word_length: config.word_length.max(1), rng }
    }

    fn word(&mut self) -> String {
        (0..self.word_length)
            .map(|_| LETTERS[self.rng.gen_range(0..LETTERS.len())] as char)
            .collect()
    }

    fn emoji(&mut self) -> String {
        EMOJI[self.rng.gen_range(0..EMOJI.len())].to_string()
    }

    fn generated_image(&mut self) -> String {
        let style = IMAGE_STYLES[self.rng.gen_range(0..IMAGE_STYLES.len())];
        format!("{style}:{}", self.rng.gen_range(0..1_000_000u32))
    }

    fn vibration(&mut self) -> String {
        let pulses = self.rng.gen_range(3..=5);
        (0..pulses)
            .map(|_| PULSE_MS[self.rng.gen_range(0..PULSE_MS.len())].to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl<R: Rng> StimulusSource for StimulusFactory<R> {
    fn mint(&mut self) -> Stimulus {
        let kind = self.kinds[self.rng.gen_range(0..self.kinds.len())];
        let payload = match kind {
            StimulusKind::Word => self.word(),
            StimulusKind::Emoji => self.emoji(),
            StimulusKind::GeneratedImage => self.generated_image(),
            StimulusKind::Vibration => self.vibration(),
        };
        Stimulus::new(kind, payload)
    }
}
