use std::io::Write;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::image_pipeline::{
    adjust::{AdjustmentParams, RgbaRaster, ToneCurve, render},
    common::{
        error::{Result, ViewerError},
        timing::PipelineTimings,
    },
    conversions::{
        scheduler::RenderScheduler,
        types::{RenderKind, RenderOutput, ViewerConfig},
    },
    decode::{Frame, FrameDecoder, ImageBytesDecoder, PixelBuffer},
    encode::{EncodedImage, JpegRasterWriter, RasterWriter, downscale},
    histogram::{HistogramEngine, HistogramResult, compute_histogram},
    history::{CaptureInfo, FrameHistory, HistoryEntry, LiveFrame},
    normalize::{NormalizeOptions, NormalizedCache, Normalizer},
};

/// One camera view: the live frame, its normalized cache, the adjustment state,
/// histograms, render history and the debounced full-resolution render.
///
/// Everything runs on the caller's thread. The host feeds frames with
/// [`ingest_frame`](Self::ingest_frame), adjustments with [`set_params`](Self::set_params)
/// and drives the debounce with [`poll`](Self::poll).
pub struct FrameViewPipeline<D: FrameDecoder, W: RasterWriter> {
    decoder: D,
    writer: W,
    config: ViewerConfig,
    live: Option<LiveFrame>,
    params: AdjustmentParams,
    histograms: HistogramEngine,
    history: FrameHistory,
    scheduler: RenderScheduler,
    latest: RenderOutput,
    last_error: Option<String>,
    timings: PipelineTimings,
}

impl FrameViewPipeline<ImageBytesDecoder, JpegRasterWriter> {
    pub fn new(config: ViewerConfig) -> Result<Self> {
        Self::with_custom(ImageBytesDecoder, JpegRasterWriter, config)
    }
}

impl<D: FrameDecoder, W: RasterWriter> FrameViewPipeline<D, W> {
    pub fn with_custom(decoder: D, writer: W, config: ViewerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            decoder,
            writer,
            histograms: HistogramEngine::new(config.histogram_bins),
            history: FrameHistory::new(config.history_capacity),
            scheduler: RenderScheduler::new(config.debounce),
            config,
            live: None,
            params: AdjustmentParams::default(),
            latest: RenderOutput::blank(),
            last_error: None,
            timings: PipelineTimings::new(),
        })
    }

    /// Enables debouncing. Until started, every adjustment renders at full resolution.
    pub fn start(&mut self) {
        debug!("Render scheduler started, debounce {:?}", self.scheduler.delay());
        self.scheduler.start();
    }

    /// Disables debouncing and drops any pending full render.
    pub fn stop(&mut self) {
        debug!("Render scheduler stopped");
        self.scheduler.stop();
    }

    fn normalizer(&self) -> Normalizer {
        Normalizer::new(NormalizeOptions {
            auto_stretch: self.params.auto_stretch,
            percentiles: self.config.stretch_percentiles,
            range: None,
            sample_limit: self.config.sample_limit,
        })
    }

    /// Turns frames above `max_dimension` into rejected frames.
    fn validate_dimensions(&self, frame: Frame) -> Frame {
        if !self.config.validate_dimensions || frame.is_empty() {
            return frame;
        }
        match self.config.max_dimension {
            Some(max) if frame.width > max || frame.height > max => {
                let message = format!(
                    "{}x{} exceeds the maximum dimension {}",
                    frame.width, frame.height, max
                );
                warn!("Rejecting frame: {}", message);
                Frame {
                    width: 0,
                    height: 0,
                    pixels: PixelBuffer::U8(Vec::new()),
                    error_message: Some(message),
                    ..frame
                }
            }
            _ => frame,
        }
    }

    fn encode(&self, raster: &RgbaRaster) -> Result<EncodedImage> {
        self.writer.encode(raster, &self.config.encode_config())
    }

    /// Replaces the live frame with the one in `data` and renders it at full resolution.
    /// If encoding fails the previous frame, histograms, output and history stay in place.
    ///
    /// A frame the device reported as failed, or one that could not be decoded, empties
    /// the view: the output is blank, nothing is added to history and
    /// [`last_error`](Self::last_error) carries the reason.
    #[instrument(skip(self, data, capture), fields(input_size = data.len()))]
    pub fn ingest_frame(&mut self, data: &[u8], capture: CaptureInfo) -> Result<RenderOutput> {
        info!("Ingesting frame");
        let mut timings = PipelineTimings::new();

        let frame = timings.measure("decode", || {
            let _span = tracing::info_span!("decode_frame").entered();
            self.decoder.decode(data)
        });

        let frame = {
            let _span = tracing::info_span!(
                "validate_dimensions",
                width = frame.width,
                height = frame.height
            )
            .entered();
            self.validate_dimensions(frame)
        };

        if frame.is_empty() {
            let reason = frame
                .error_message
                .clone()
                .unwrap_or_else(|| "empty frame".to_string());
            warn!(error_code = frame.error_code, "No image to display: {}", reason);

            let cache = NormalizedCache::empty();
            self.scheduler.cancel();
            self.histograms.reset(&cache, &self.params);
            self.live = Some(LiveFrame { frame, cache });
            self.last_error = Some(reason);
            self.latest = RenderOutput::blank();
            self.timings = timings;
            return Ok(self.latest.clone());
        }

        let cache = timings.measure("normalize", || {
            let _span = tracing::info_span!("normalize").entered();
            self.normalizer().process(&frame)
        });

        // Committed together with the live frame once every fallible step has succeeded.
        let mut histograms = HistogramEngine::new(self.config.histogram_bins);
        timings.measure("histogram", || {
            let _span = tracing::info_span!("histogram").entered();
            histograms.reset(&cache, &self.params)
        });

        let raster = timings.measure("adjust", || {
            let _span = tracing::info_span!("adjust", stride = 1).entered();
            render(&cache, &self.params, 1)
        });

        let image = timings.measure("encode", || {
            let _span = tracing::info_span!("encode_jpeg").entered();
            self.encode(&raster)
        })?;

        let thumbnail = timings.measure("thumbnail", || {
            let edge = self.config.thumbnail_edge;
            let _span = tracing::info_span!("thumbnail", max_edge = edge).entered();
            downscale(&raster, edge).and_then(|small| self.encode(&small))
        })?;

        self.scheduler.cancel();
        self.history.push(HistoryEntry::new(thumbnail, image.clone(), capture));
        self.histograms = histograms;

        info!(
            width = frame.width,
            height = frame.height,
            stretched = cache.stretched,
            "Frame rendered"
        );

        self.live = Some(LiveFrame { frame, cache });
        self.last_error = None;
        self.latest = RenderOutput {
            kind: RenderKind::Full,
            stride: 1,
            image,
        };
        timings.log_summary();
        self.timings = timings;
        Ok(self.latest.clone())
    }

    #[instrument(skip(self, input_path, capture))]
    pub fn ingest_file<P: AsRef<Path>>(
        &mut self,
        input_path: P,
        capture: CaptureInfo,
    ) -> Result<RenderOutput> {
        let input_path = input_path.as_ref();
        info!(input = %input_path.display(), "Reading frame file");

        let data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ViewerError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        self.ingest_frame(&data, capture)
    }

    /// Applies new adjustment parameters to the live frame.
    ///
    /// While the scheduler runs, this renders a preview at the configured stride and
    /// (re)schedules a full-resolution render for `now + debounce`. While stopped it
    /// renders at full resolution directly. Toggling `auto_stretch` re-normalizes the
    /// frame into a fresh cache.
    pub fn set_params(&mut self, params: AdjustmentParams, now: Instant) -> Result<RenderOutput> {
        let params = params.sanitized();
        let restretch = params.auto_stretch != self.params.auto_stretch;
        self.params = params;

        let Some(live) = self.live.as_ref().filter(|live| !live.is_empty()) else {
            return Ok(self.latest.clone());
        };

        if restretch {
            debug!("auto_stretch now {}, re-normalizing", params.auto_stretch);
            let cache = self.normalizer().process(&live.frame);
            self.histograms.reset(&cache, &self.params);
            if let Some(live) = self.live.as_mut() {
                live.cache = cache;
            }
        }

        if !self.scheduler.is_running() {
            return self.render_full();
        }

        let stride = self.config.preview_stride;
        let mut timings = PipelineTimings::new();
        let image = {
            let cache = match &self.live {
                Some(live) => &live.cache,
                None => return Ok(self.latest.clone()),
            };
            let raster = timings.measure("adjust", || render(cache, &self.params, stride));
            timings.measure("histogram", || self.histograms.update(cache, &self.params, stride));
            timings.measure("encode", || self.encode(&raster))?
        };

        self.scheduler.schedule(now);
        self.latest = RenderOutput {
            kind: RenderKind::Preview,
            stride,
            image,
        };
        self.timings = timings;
        Ok(self.latest.clone())
    }

    /// Runs the pending full-resolution render once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Result<Option<RenderOutput>> {
        if self.scheduler.poll(now) {
            debug!("Debounce elapsed, rendering full resolution");
            return self.render_full().map(Some);
        }
        Ok(None)
    }

    /// Renders the live frame at full resolution with the current parameters and
    /// refreshes the current histogram. Cancels any pending render.
    pub fn render_full(&mut self) -> Result<RenderOutput> {
        self.scheduler.cancel();

        let cache = match &self.live {
            Some(live) if !live.is_empty() => &live.cache,
            _ => return Ok(self.latest.clone()),
        };

        let mut timings = PipelineTimings::new();
        let raster = timings.measure("adjust", || render(cache, &self.params, 1));
        timings.measure("histogram", || self.histograms.update(cache, &self.params, 1));
        let image = timings.measure("encode", || self.encode(&raster))?;

        self.latest = RenderOutput {
            kind: RenderKind::Full,
            stride: 1,
            image,
        };
        self.timings = timings;
        Ok(self.latest.clone())
    }

    /// Writes the most recent rendering to `output`.
    pub fn write_latest_to(&self, output: &mut dyn Write) -> Result<()> {
        if self.latest.is_blank() {
            return Err(ViewerError::OutputWriteError("no rendering available".to_string()));
        }
        output.write_all(&self.latest.image.data)?;
        output.flush()?;
        Ok(())
    }

    #[instrument(skip(self, output_path))]
    pub fn write_latest<P: AsRef<Path>>(&self, output_path: P) -> Result<()> {
        let output_path = output_path.as_ref();
        info!(output = %output_path.display(), "Writing latest rendering");

        if self.latest.is_blank() {
            return Err(ViewerError::OutputWriteError(format!(
                "{}: no rendering available",
                output_path.display()
            )));
        }

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                ViewerError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.write_latest_to(&mut output_file)
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.live.as_ref().map(|live| &live.frame)
    }

    pub fn cache(&self) -> Option<&NormalizedCache> {
        self.live.as_ref().map(|live| &live.cache)
    }

    pub fn params(&self) -> &AdjustmentParams {
        &self.params
    }

    pub fn original_histogram(&self) -> &HistogramResult {
        self.histograms.original()
    }

    /// Histogram after adjustments. Stale while only previews have been rendered.
    pub fn current_histogram(&self) -> &HistogramResult {
        self.histograms.current()
    }

    /// Original histogram after the display moving average.
    pub fn smoothed_original_histogram(&self) -> Vec<f64> {
        self.histograms.original().smoothed()
    }

    /// Current histogram after the display moving average.
    pub fn smoothed_current_histogram(&self) -> Vec<f64> {
        self.histograms.current().smoothed()
    }

    pub fn current_histogram_is_stale(&self) -> bool {
        self.histograms.current_is_stale()
    }

    /// Current histogram at the compact bin count.
    pub fn compact_histogram(&self) -> HistogramResult {
        let compact = self.config.compact_bins;
        self.histograms.current().rebin(compact).unwrap_or_else(|| match self.cache() {
            Some(cache) => {
                compute_histogram(cache, Some(&ToneCurve::new(&self.params)), compact, 1)
            }
            None => HistogramResult::empty(compact),
        })
    }

    pub fn history(&self) -> &FrameHistory {
        &self.history
    }

    pub fn latest_output(&self) -> &RenderOutput {
        &self.latest
    }

    /// Why the live frame is empty, if the last ingest failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Stage timings of the most recent ingest or render.
    pub fn last_timings(&self) -> &PipelineTimings {
        &self.timings
    }

    pub fn has_pending_render(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}
