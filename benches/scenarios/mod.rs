mod chords;
mod slide;

pub use chords::bench_chords;
pub use slide::bench_slide;
