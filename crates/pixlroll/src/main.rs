// File: crates/pixlroll/src/main.rs
// Summary: Live waterfall window: a reader thread decodes sample blocks, the winit loop plots them via softbuffer.

use std::fs::File;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use pixlroll_core::{theme, BlockReader, Palette, PlotOptions, Plotter, SampleFormat, ScrollMode, SurfaceHooks};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use winit::window::WindowBuilder;

#[derive(Parser, Debug)]
#[command(name = "pixlroll", version, about = "Scrolling waterfall plot of a raw sample stream")]
struct Cli {
    /// Sample source: named pipe, character device or plain file.
    input: PathBuf,

    /// Plot width in samples per row.
    #[arg(long, default_value_t = 1000)]
    width: i32,

    /// Plot height in rows of history.
    #[arg(long, default_value_t = 600)]
    height: i32,

    /// Palette: rainbow or rssi.
    #[arg(long, default_value = "rainbow")]
    colormap: Palette,

    /// Show a cumulative histogram over the last N samples.
    #[arg(long, value_name = "N")]
    histogram: Option<usize>,

    /// Stamp wall-clock time in a gutter right of the plot.
    #[arg(long, default_value_t = false)]
    timestamps: bool,

    /// Seconds between timestamp labels.
    #[arg(long, value_name = "SECS", default_value_t = 60)]
    timestamp_interval: i64,

    #[arg(long, value_enum, default_value_t = ScrollArg::Blit)]
    scroll_mode: ScrollArg,

    /// Hide the color legend.
    #[arg(long, default_value_t = false)]
    no_legend: bool,

    /// Color theme: dark or light.
    #[arg(long, default_value = "dark")]
    theme: String,

    /// Bytes per read from the source.
    #[arg(long, default_value_t = pixlroll_core::source::BLOCK_SIZE)]
    blocksize: usize,

    /// Sample encoding: int8 or uint8. Also sets the plotted range.
    #[arg(long = "type", default_value = "int8")]
    sample_type: SampleFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScrollArg {
    /// Shift history up one row per scroll.
    Blit,
    /// Overwrite rows top to bottom and wrap.
    Wipe,
}

impl From<ScrollArg> for ScrollMode {
    fn from(a: ScrollArg) -> Self {
        match a {
            ScrollArg::Blit => ScrollMode::Blit,
            ScrollArg::Wipe => ScrollMode::Wipe,
        }
    }
}

#[derive(Debug)]
enum AppEvent {
    Batch(Vec<i32>),
    SourceClosed,
}

impl Cli {
    fn plot_options(&self) -> anyhow::Result<PlotOptions> {
        let mut opts = PlotOptions::default();
        opts.range = self.sample_type.range();
        opts.palette = self.colormap;
        opts.plot_width = self.width;
        opts.plot_height = self.height;
        opts.scroll_mode = self.scroll_mode.into();
        opts.overlays.legend = !self.no_legend;
        opts.theme = theme::find(&self.theme);
        if let Some(n) = self.histogram {
            opts = opts.with_histogram(n);
        }
        if self.timestamps {
            let interval = chrono::Duration::try_seconds(self.timestamp_interval)
                .with_context(|| format!("timestamp interval {}s is out of range", self.timestamp_interval))?;
            opts = opts.with_timestamps(interval);
        }
        opts.validate().context("invalid plot options")?;
        Ok(opts)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    std::fs::metadata(&cli.input).with_context(|| format!("input {}", cli.input.display()))?;
    let mut plotter = Plotter::new(&cli.plot_options()?).context("create plotter")?;

    let event_loop = EventLoopBuilder::<AppEvent>::with_user_event().build();
    let (w, h) = plotter.natural_size();
    let window = WindowBuilder::new()
        .with_title(format!("pixlroll: {}", cli.input.display()))
        .with_inner_size(PhysicalSize::new(w as u32, h as u32))
        .build(&event_loop)
        .context("create window")?;

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

    plotter.on_attach();
    let size = window.inner_size();
    plotter.on_resize(size.width as i32, size.height as i32);

    spawn_reader(cli.input.clone(), cli.sample_type, cli.blocksize, event_loop.create_proxy())?;

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *cf = ControlFlow::Exit,
                WindowEvent::Resized(new_size) => {
                    plotter.on_resize(new_size.width as i32, new_size.height as i32);
                    window.request_redraw();
                }
                _ => {}
            },
            Event::UserEvent(AppEvent::Batch(samples)) => {
                let summary = plotter.add_data(&samples);
                for at in &summary.stamps {
                    tracing::debug!(at = %at.format("%H:%M:%S"), "timestamp");
                }
            }
            Event::UserEvent(AppEvent::SourceClosed) => {
                tracing::info!(scrolls = plotter.scroll().scroll_count(), "source closed; window stays open");
            }
            Event::MainEventsCleared => {
                if plotter.needs_redraw() {
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(_) => {
                if let Err(e) = present(&mut plotter, &mut surface) {
                    tracing::error!("present failed: {e:#}");
                    *cf = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    })
}

fn spawn_reader(path: PathBuf, format: SampleFormat, block_size: usize, proxy: EventLoopProxy<AppEvent>) -> anyhow::Result<()> {
    std::thread::Builder::new()
        .name("sample-reader".into())
        .spawn(move || {
            if let Err(e) = read_loop(&path, format, block_size, &proxy) {
                tracing::error!("reading {}: {e:#}", path.display());
            }
            let _ = proxy.send_event(AppEvent::SourceClosed);
        })
        .context("spawn reader thread")?;
    Ok(())
}

// Opening a FIFO blocks until a writer shows up, so it happens here rather than on the UI thread.
fn read_loop(path: &Path, format: SampleFormat, block_size: usize, proxy: &EventLoopProxy<AppEvent>) -> anyhow::Result<()> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut reader = BlockReader::new(file, format, block_size)?;
    tracing::info!(path = %path.display(), %format, block_size, "reading samples");

    let mut batches = 0u64;
    while let Some(samples) = reader.read_batch()? {
        batches += 1;
        if proxy.send_event(AppEvent::Batch(samples)).is_err() {
            // event loop is gone
            break;
        }
    }
    tracing::info!(batches, "end of stream");
    Ok(())
}

fn present(plotter: &mut Plotter, surface: &mut softbuffer::Surface) -> anyhow::Result<()> {
    let (rgba, w, h, _) = plotter.frame_rgba8()?;
    let (Some(nw), Some(nh)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else {
        return Ok(());
    };
    surface.resize(nw, nh).map_err(|e| anyhow::anyhow!("resize surface: {e}"))?;

    // softbuffer pixels are 0RGB in a u32
    let mut frame = surface.buffer_mut().map_err(|e| anyhow::anyhow!("frame: {e}"))?;
    for (dst, px) in frame.iter_mut().zip(rgba.chunks_exact(4)) {
        let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
        *dst = (r << 16) | (g << 8) | b;
    }
    frame.present().map_err(|e| anyhow::anyhow!("present: {e}"))?;
    Ok(())
}
