//! Streaming page metadata collection.
//!
//! Counts `<a>` and `<img>` element starts while the response body flows to
//! the archive. Chunks are handed on untouched; the tokenizer only observes
//! them, so the archived bytes are exactly the bytes received.

use std::cell::Cell;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use bytes::Bytes;
use chrono::{DateTime, Local};
use futures::{ready, Stream, StreamExt};
use lol_html::{element, HtmlRewriter, Settings};

/// Structural counts for one archived page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetrics {
    /// `<a>` element starts
    pub num_links: usize,
    /// `<img>` element starts
    pub num_images: usize,
    /// Modification time of the previous archive, `None` if there was none.
    pub last_fetch: Option<DateTime<Local>>,
}

#[derive(Default)]
struct TagCounts {
    links: Cell<usize>,
    images: Cell<usize>,
}

type ObservingRewriter = HtmlRewriter<'static, fn(&[u8])>;

fn discard(_: &[u8]) {}

/// Incremental `<a>`/`<img>` counter backed by lol_html's streaming tokenizer.
///
/// One collector belongs to one page. The element handlers share only this
/// collector's private counters.
pub struct MetadataCollector {
    rewriter: Option<Box<ObservingRewriter>>,
    counts: Rc<TagCounts>,
}

impl MetadataCollector {
    /// Creates a collector with zeroed counts.
    pub fn new() -> Self {
        let counts = Rc::new(TagCounts::default());
        let links = Rc::clone(&counts);
        let images = Rc::clone(&counts);

        let rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![
                    element!("a", move |_el| {
                        links.links.set(links.links.get() + 1);
                        Ok(())
                    }),
                    element!("img", move |_el| {
                        images.images.set(images.images.get() + 1);
                        Ok(())
                    }),
                ],
                ..Settings::default()
            },
            discard as fn(&[u8]),
        );

        Self {
            rewriter: Some(Box::new(rewriter)),
            counts,
        }
    }

    /// Feeds one body chunk to the tokenizer.
    ///
    /// Tags split across chunk boundaries are buffered by the tokenizer and
    /// counted once complete. A tokenizer failure stops counting for this page
    /// but is not an error for the caller.
    pub fn observe(&mut self, chunk: &[u8]) {
        if let Some(rewriter) = self.rewriter.as_mut() {
            if let Err(e) = rewriter.write(chunk) {
                log::warn!("Metadata collection stopped, counts will be partial: {e}");
                self.rewriter = None;
            }
        }
    }

    /// Flushes the tokenizer and returns the final counts.
    pub fn finish(mut self, last_fetch: Option<DateTime<Local>>) -> PageMetrics {
        if let Some(rewriter) = self.rewriter.take() {
            if let Err(e) = (*rewriter).end() {
                log::warn!("Metadata collection could not finish cleanly: {e}");
            }
        }

        PageMetrics {
            num_links: self.counts.links.get(),
            num_images: self.counts.images.get(),
            last_fetch,
        }
    }
}

impl Default for MetadataCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Passthrough body stream that feeds every chunk to a [`MetadataCollector`].
///
/// Counts are only final once the stream has been driven to completion; call
/// [`CollectingStream::finish`] afterwards.
pub struct CollectingStream<S> {
    inner: S,
    collector: MetadataCollector,
}

/// Wraps a body stream so that consuming it also collects page metadata.
pub fn collect<S>(body: S) -> CollectingStream<S> {
    CollectingStream {
        inner: body,
        collector: MetadataCollector::new(),
    }
}

impl<S> CollectingStream<S> {
    /// Consumes the stream wrapper and returns the collected metrics.
    pub fn finish(self, last_fetch: Option<DateTime<Local>>) -> PageMetrics {
        self.collector.finish(last_fetch)
    }
}

impl<S, E> Stream for CollectingStream<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
{
    type Item = Result<Bytes, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        match ready!(this.inner.poll_next_unpin(cx)) {
            Some(Ok(chunk)) => {
                this.collector.observe(&chunk);
                Poll::Ready(Some(Ok(chunk)))
            }
            other => Poll::Ready(other),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
