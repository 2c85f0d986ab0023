//! Worker pool that lights disjoint world slices in parallel.
#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, unbounded};
use hashbrown::HashMap;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use vorld_blocks::MAX_LIGHT;
use vorld_lighting::{Lighter, LightingPassStats};
use vorld_world::{ChunkBounds, ChunkCoord, World, WorldError};

/// Chunks a slice must extend past its region so that every light path
/// ending inside the region lies inside the slice.
pub fn light_padding(chunk_size: usize) -> i32 {
    let reach = i32::from(MAX_LIGHT) - 1;
    let size = chunk_size.max(1) as i32;
    (reach + size - 1) / size
}

#[derive(Debug)]
pub struct LightJob {
    pub job_id: u64,
    /// Chunks whose light this job is responsible for.
    pub region: ChunkBounds,
    /// Copy of the world around `region`, padded by [`light_padding`].
    pub slice: World,
}

#[derive(Debug)]
pub struct LightJobOut {
    pub job_id: u64,
    pub region: ChunkBounds,
    /// The lit slice trimmed back to `region` (plus vertical padding).
    pub world: World,
    pub stats: LightingPassStats,
    pub t_light_ms: u32,
}

fn process_light_job(job: LightJob, lighter: &mut Lighter, tx: &Sender<LightJobOut>) {
    let LightJob {
        job_id,
        region,
        mut slice,
    } = job;
    let t0 = Instant::now();
    let stats = lighter.perform_lighting_pass(&mut slice, None);
    let pad = light_padding(slice.chunk_size());
    let world = slice.create_slice(vertically_padded(region, pad));
    let t_light_ms = t0.elapsed().as_millis() as u32;
    let _ = tx.send(LightJobOut {
        job_id,
        region,
        world,
        stats,
        t_light_ms,
    });
}

// Block light spills into chunks above and below the written range; keep
// them with the region that lit them.
fn vertically_padded(region: ChunkBounds, pad: i32) -> ChunkBounds {
    ChunkBounds::new(
        region.min.with_y(region.min.cy - pad),
        region.max.with_y(region.max.cy + pad),
    )
}

pub struct Runtime {
    job_tx: Sender<LightJob>,
    res_rx: Receiver<LightJobOut>,
    _pool: Arc<ThreadPool>,
    q_light: Arc<AtomicUsize>,
    inflight_light: Arc<AtomicUsize>,
    pub workers: usize,
}

impl Runtime {
    /// Starts `workers` lighting threads, or one per available core when
    /// `None`.
    pub fn new(workers: Option<usize>) -> Result<Self, ThreadPoolBuildError> {
        let (job_tx, job_rx) = unbounded::<LightJob>();
        let (res_tx, res_rx) = unbounded::<LightJobOut>();
        let workers = workers
            .unwrap_or_else(|| thread::available_parallelism().map(|n| n.get()).unwrap_or(8))
            .max(1);
        let q_light = Arc::new(AtomicUsize::new(0));
        let inflight_light = Arc::new(AtomicUsize::new(0));

        let pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("vorld-light-{i}"))
                .build()?,
        );
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = res_tx.clone();
            let q_light = q_light.clone();
            let inflight_light = inflight_light.clone();
            pool.spawn(move || {
                let mut lighter = Lighter::new();
                while let Ok(job) = rx.recv() {
                    q_light.fetch_sub(1, Ordering::Relaxed);
                    inflight_light.fetch_add(1, Ordering::Relaxed);
                    process_light_job(job, &mut lighter, &tx);
                    inflight_light.fetch_sub(1, Ordering::Relaxed);
                }
            });
        }
        log::debug!(target: "runtime", "started {workers} lighting workers");

        Ok(Self {
            job_tx,
            res_rx,
            _pool: pool,
            q_light,
            inflight_light,
            workers,
        })
    }

    pub fn submit_light_job(&self, job: LightJob) {
        self.q_light.fetch_add(1, Ordering::Relaxed);
        if self.job_tx.send(job).is_err() {
            self.q_light.fetch_sub(1, Ordering::Relaxed);
        }
    }

    /// Blocks until a worker finishes a job.
    pub fn recv_result(&self) -> Option<LightJobOut> {
        self.res_rx.recv().ok()
    }

    pub fn drain_worker_results(&self) -> Vec<LightJobOut> {
        self.res_rx.try_iter().collect()
    }

    /// `(queued, inflight)`
    pub fn queue_debug_counts(&self) -> (usize, usize) {
        (
            self.q_light.load(Ordering::Relaxed),
            self.inflight_light.load(Ordering::Relaxed),
        )
    }
}

/// Groups the world's chunk columns into square regions `region_chunks`
/// columns wide, each spanning the world's full written chunk-Y range.
pub fn partition_columns(world: &World, region_chunks: i32) -> Vec<ChunkBounds> {
    let n = region_chunks.max(1);
    let mut min_j = i32::MAX;
    let mut max_j = i32::MIN;
    let mut regions: HashMap<(i32, i32), ((i32, i32), (i32, i32))> = HashMap::new();
    for entry in world.height_entries() {
        min_j = min_j.min(entry.min_chunk_j);
        max_j = max_j.max(entry.max_chunk_j);
        let key = (entry.chunk_i.div_euclid(n), entry.chunk_k.div_euclid(n));
        let cell = (entry.chunk_i, entry.chunk_k);
        regions
            .entry(key)
            .and_modify(|(lo, hi)| {
                *lo = (lo.0.min(cell.0), lo.1.min(cell.1));
                *hi = (hi.0.max(cell.0), hi.1.max(cell.1));
            })
            .or_insert((cell, cell));
    }
    let mut out: Vec<ChunkBounds> = regions
        .into_values()
        .map(|((lo_i, lo_k), (hi_i, hi_k))| {
            ChunkBounds::new(ChunkCoord::new(lo_i, min_j, lo_k), ChunkCoord::new(hi_i, max_j, hi_k))
        })
        .collect();
    out.sort_unstable_by_key(|b| (b.min.cx, b.min.cz));
    out
}

/// Lights `regions` of `world` on the runtime's workers and merges the
/// results back. Equivalent to a single lighting pass over those regions
/// of a world holding no light. Stats are summed over slices, padding
/// included.
pub fn light_world_parallel(
    world: &mut World,
    runtime: &Runtime,
    regions: &[ChunkBounds],
) -> Result<LightingPassStats, WorldError> {
    let t0 = Instant::now();
    let pad = light_padding(world.chunk_size());
    for (job_id, region) in regions.iter().enumerate() {
        runtime.submit_light_job(LightJob {
            job_id: job_id as u64,
            region: *region,
            slice: world.create_slice(region.expanded(pad)),
        });
    }

    let mut total = LightingPassStats::default();
    for _ in 0..regions.len() {
        let Some(out) = runtime.recv_result() else {
            break;
        };
        log::debug!(
            target: "runtime",
            "job {} lit {} chunks in {} ms",
            out.job_id,
            out.world.chunk_count(),
            out.t_light_ms
        );
        total.columns += out.stats.columns;
        total.sun_seeds += out.stats.sun_seeds;
        total.emitters += out.stats.emitters;
        world.try_merge(out.world)?;
    }
    log::info!(
        target: "runtime",
        "lit {} regions on {} workers in {} ms",
        regions.len(),
        runtime.workers,
        t0.elapsed().as_millis()
    );
    Ok(total)
}
