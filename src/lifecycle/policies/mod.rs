mod end_of_life;

pub use end_of_life::EndOfLifePolicy;
