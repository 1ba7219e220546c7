//! Lazy image loading.
//!
//! Images start with only a `data_src`.  When one comes within
//! [`LAZY_ROOT_MARGIN_ROWS`] of the viewport its `src` is set, a load is
//! requested and the image is unobserved.  The `lazy` (blurred) flag is
//! cleared only when the load completes.

use super::assets::ImageSource;
use super::observer::{IntersectionObserver, ObserverOptions, RowSpan};

/// How far outside the viewport an image starts loading.
pub const LAZY_ROOT_MARGIN_ROWS: i32 = 10;

#[derive(Debug, Clone)]
pub struct LazyImage {
    pub data_src: ImageSource,
    pub src: Option<ImageSource>,
    pub lazy: bool,
}

/// A load the runtime should start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub id: usize,
    pub source: ImageSource,
}

#[derive(Debug)]
pub struct LazyImages {
    images: Vec<LazyImage>,
    observer: IntersectionObserver<usize>,
}

impl LazyImages {
    pub fn new(sources: Vec<ImageSource>) -> Self {
        let mut observer = IntersectionObserver::new(ObserverOptions {
            threshold: 0.0,
            root_margin: LAZY_ROOT_MARGIN_ROWS,
        });
        let images = sources
            .into_iter()
            .enumerate()
            .map(|(id, data_src)| {
                observer.observe(id);
                LazyImage {
                    data_src,
                    src: None,
                    lazy: true,
                }
            })
            .collect();
        Self { images, observer }
    }

    /// Check the images against the viewport and return the loads to start.
    pub fn update(&mut self, viewport: RowSpan, rects: &[RowSpan]) -> Vec<LoadRequest> {
        let mut requests = Vec::new();
        for entry in self.observer.take_entries(viewport, |i| rects.get(i).copied()) {
            if !entry.is_intersecting {
                continue;
            }
            let Some(image) = self.images.get_mut(entry.target) else {
                continue;
            };
            image.src = Some(image.data_src.clone());
            self.observer.unobserve(entry.target);
            tracing::debug!(id = entry.target, src = %image.data_src.label(), "lazy image requested");
            requests.push(LoadRequest {
                id: entry.target,
                source: image.data_src.clone(),
            });
        }
        requests
    }

    /// The image finished loading: drop the blur.
    pub fn on_load(&mut self, id: usize) {
        if let Some(image) = self.images.get_mut(id) {
            image.lazy = false;
        }
    }

    /// The load failed.  The image keeps its `lazy` flag.
    pub fn on_error(&mut self, id: usize, error: &str) {
        tracing::warn!(id, error, "lazy image failed to load");
    }

    pub fn get(&self, id: usize) -> Option<&LazyImage> {
        self.images.get(id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.images.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: u32) -> LazyImages {
        LazyImages::new((0..n).map(|seed| ImageSource::Generated { seed }).collect())
    }

    #[test]
    fn nothing_loads_far_away() {
        let mut l = images(2);
        let rects = [RowSpan::new(100, 8), RowSpan::new(120, 8)];
        assert!(l.update(RowSpan::new(0, 30), &rects).is_empty());
        assert!(l.get(0).unwrap().src.is_none());
    }

    #[test]
    fn loads_within_the_margin_once() {
        let mut l = images(2);
        // Image 0 starts 5 rows below the viewport, inside the margin.
        let rects = [RowSpan::new(35, 8), RowSpan::new(120, 8)];
        let req = l.update(RowSpan::new(0, 30), &rects);
        assert_eq!(
            req,
            vec![LoadRequest {
                id: 0,
                source: ImageSource::Generated { seed: 0 }
            }]
        );
        assert_eq!(l.get(0).unwrap().src, Some(ImageSource::Generated { seed: 0 }));
        assert!(l.update(RowSpan::new(100, 30), &rects).iter().all(|r| r.id != 0));
    }

    #[test]
    fn lazy_flag_clears_only_on_load() {
        let mut l = images(1);
        l.update(RowSpan::new(0, 30), &[RowSpan::new(0, 8)]);
        assert!(l.get(0).unwrap().lazy);
        l.on_error(0, "boom");
        assert!(l.get(0).unwrap().lazy);
        l.on_load(0);
        assert!(!l.get(0).unwrap().lazy);
    }
}
