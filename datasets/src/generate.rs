//! Utility functions for randomly generating datasets

use eduml::Dataset;
use ndarray::{s, Array, Array1, Array2, ArrayBase, Data, Ix1, Ix2};
use ndarray_rand::{
    rand::Rng,
    rand_distr::{Distribution, StandardNormal},
    RandomExt,
};

/// Special case of `blobs_with_distribution` with a standard normal distribution.
pub fn blobs(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    blobs_with_distribution(blob_size, blob_centroids, StandardNormal, rng)
}

/// Given an input matrix `blob_centroids`, with shape `(n_blobs, n_features)`,
/// generate `blob_size` data points (a "blob") around each of the blob centroids.
///
/// More specifically, each blob is formed by `blob_size` points sampled from a distribution
/// centered in the blob centroid.
pub fn blobs_with_distribution(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    distribution: impl Distribution<f64> + Clone,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let (n_centroids, n_features) = blob_centroids.dim();
    let mut blobs: Array2<f64> = Array2::zeros((n_centroids * blob_size, n_features));

    for (blob_index, blob_centroid) in blob_centroids.rows().into_iter().enumerate() {
        let blob = make_blob(blob_size, &blob_centroid, distribution.clone(), rng);

        let indexes = s![blob_index * blob_size..(blob_index + 1) * blob_size, ..];
        blobs.slice_mut(indexes).assign(&blob);
    }
    blobs
}

/// Generate `blob_size` data points (a "blob") around `blob_centroid` using the given distribution.
fn make_blob(
    blob_size: usize,
    blob_centroid: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    distribution: impl Distribution<f64>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let shape = (blob_size, blob_centroid.len());
    let origin_blob: Array2<f64> = Array::random_using(shape, distribution, rng);
    origin_blob + blob_centroid
}

/// Two standard normal blobs centred at `(-offset, ..)` and `(+offset, ..)`
///
/// The first `blob_size` samples are labelled `-1`, the remaining ones `+1`. For an offset of a
/// few units the classes are linearly separable with high probability.
pub fn signed_blobs(
    blob_size: usize,
    n_features: usize,
    offset: f64,
    rng: &mut impl Rng,
) -> Dataset<f64, f64> {
    let mut centroids = Array2::from_elem((2, n_features), offset);
    centroids.row_mut(0).fill(-offset);

    let records = blobs(blob_size, &centroids, rng);
    let targets = Array1::from_shape_fn(2 * blob_size, |i| if i < blob_size { -1. } else { 1. });

    Dataset::new(records, targets)
}

/// Flattened `side x side` images, each black except for one randomly chosen white row
///
/// Pixel intensities are `0.0` or `1.0`, the shape is `(n_images, side * side)`. Images without
/// pixels (`side == 0`) are empty rows.
pub fn stripes(n_images: usize, side: usize, rng: &mut impl Rng) -> Array2<f64> {
    let mut images = Array2::zeros((n_images, side * side));
    if side == 0 {
        return images;
    }
    for mut image in images.rows_mut() {
        let row = rng.gen_range(0..side);
        image.slice_mut(s![row * side..(row + 1) * side]).fill(1.0);
    }
    images
}
