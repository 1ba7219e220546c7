//! Background image decoding to keep the UI thread responsive.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use image::RgbaImage;
use tokio::sync::mpsc;

use crate::core::assets::{self, AssetError, ImageSource};

/// Which page element an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKey {
    /// A lazy feature image, by lazy id.
    Feature(usize),
    /// An image slide, by slide position.
    Slide(usize),
}

pub struct ImageUpdate {
    pub key: ImageKey,
    pub result: Result<Arc<RgbaImage>, AssetError>,
}

fn decode_and_send(tx: &mpsc::UnboundedSender<ImageUpdate>, key: ImageKey, source: &ImageSource) -> bool {
    let t0 = std::time::Instant::now();
    let result = assets::decode(source).map(Arc::new);
    tracing::debug!(?key, src = %source.label(), ok = result.is_ok(), "decode: {:.2?}", t0.elapsed());
    tx.send(ImageUpdate { key, result }).is_ok()
}

/// Decode `source` on its own thread and report back over `tx`.
pub fn spawn_image_load(tx: mpsc::UnboundedSender<ImageUpdate>, key: ImageKey, source: ImageSource) {
    std::thread::spawn(move || {
        decode_and_send(&tx, key, &source);
    });
}

/// Decode a batch of images on a fixed number of worker threads.
///
/// Workers share one queue and stop once it is drained or the receiver is
/// gone, so a folder of thousands of pictures never means thousands of
/// threads.  Returns the number of workers started.
pub fn spawn_decode_pool(tx: mpsc::UnboundedSender<ImageUpdate>, jobs: Vec<(ImageKey, ImageSource)>) -> usize {
    if jobs.is_empty() {
        return 0;
    }
    let max_threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        .max(1);
    let worker_count = max_threads.min(jobs.len());
    tracing::debug!(jobs = jobs.len(), workers = worker_count, "decode pool");

    let queue = Arc::new(Mutex::new(VecDeque::from(jobs)));
    for _ in 0..worker_count {
        let queue = Arc::clone(&queue);
        let tx = tx.clone();
        std::thread::spawn(move || loop {
            let next = match queue.lock() {
                Ok(mut q) => q.pop_front(),
                Err(_) => break,
            };
            let Some((key, source)) = next else {
                break;
            };
            if !decode_and_send(&tx, key, &source) {
                break;
            }
        });
    }
    worker_count
}
