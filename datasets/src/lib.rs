//! `eduml-datasets` provides synthetic datasets ready to be used in tests, benchmarks and demos
//! of the `eduml` models.
//!
//! ## Current State
//!
//! Everything is generated from a caller-provided random number generator, so results are
//! reproducible with a seeded generator:
//!
//! * [`generate::blobs`]: points around given centroids
//! * [`generate::signed_blobs`]: two linearly separable blobs labelled `-1` and `+1`
//! * [`generate::stripes`]: flattened binary images with a single bright row, a toy target
//!   distribution for generative models
//!
//! ```ignore
//! let mut rng = Xoshiro256Plus::seed_from_u64(42);
//! let dataset = eduml_datasets::generate::signed_blobs(100, 2, 3.0, &mut rng);
//! ```

pub mod generate;
