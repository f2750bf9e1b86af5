//! Processors shipped with cascade.
//!
//! | name             | does                                                  |
//! |------------------|-------------------------------------------------------|
//! | `prefixer`       | adds vendor prefixes needed by a browser list         |
//! | `minifier`       | optimises rules and prints compact output             |
//! | `important-lint` | warns on every `!important` declaration               |

mod important;
mod minifier;
mod prefixer;

pub use important::ImportantLint;
pub use minifier::Minifier;
pub use prefixer::Prefixer;
