use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;
use strand::{
  number_pipeline, DelaySource, FsStorage, ItemContext, MemorySink, Pipeline, PipelineRunner, StageDeps,
  StorageGateway, StrandError,
};
use tempfile::TempDir;
use tokio::runtime::Runtime; // To run async code within Criterion

// --- Common Benchmark Context ---
#[derive(Clone, Debug, Default)]
struct BenchContext {
  counter: u64,
}

// --- Helper: a chain of `num_steps` synchronous increments ---
fn sync_chain(num_steps: usize) -> Pipeline<BenchContext, StrandError> {
  // Pipeline::new takes &str; the names must outlive the pipeline.
  let names: Vec<&'static str> = (0..num_steps)
    .map(|i| Box::leak(format!("step_{}", i).into_boxed_str()) as &'static str)
    .collect();
  let mut pipeline = Pipeline::<BenchContext, StrandError>::new(&names);
  for name in &names {
    pipeline.on_sync(name, |mut ctx: BenchContext| {
      ctx.counter = ctx.counter.wrapping_add(1);
      Ok::<_, StrandError>(ctx)
    });
  }
  pipeline
}

// --- Helper: a chain of `num_steps` suspending steps that yield once each ---
fn yielding_chain(num_steps: usize) -> Pipeline<BenchContext, StrandError> {
  let names: Vec<&'static str> = (0..num_steps)
    .map(|i| Box::leak(format!("async_step_{}", i).into_boxed_str()) as &'static str)
    .collect();
  let mut pipeline = Pipeline::<BenchContext, StrandError>::new(&names);
  for name in &names {
    pipeline.on(name, |mut ctx: BenchContext| async move {
      tokio::task::yield_now().await;
      ctx.counter += 1;
      Ok::<_, StrandError>(ctx)
    });
  }
  pipeline
}

fn bench_chain_execution(c: &mut Criterion) {
  let mut group = c.benchmark_group("ChainExecution");
  let rt = Runtime::new().unwrap();

  for num_steps in [1usize, 8, 32] {
    let sync_pipeline = sync_chain(num_steps);
    group.bench_with_input(BenchmarkId::new("sync", num_steps), &num_steps, |b, _| {
      b.to_async(&rt).iter(|| async { sync_pipeline.run(BenchContext::default()).await.unwrap() });
    });

    let async_pipeline = yielding_chain(num_steps);
    group.bench_with_input(BenchmarkId::new("suspending", num_steps), &num_steps, |b, _| {
      b.to_async(&rt).iter(|| async { async_pipeline.run(BenchContext::default()).await.unwrap() });
    });
  }
  group.finish();
}

fn bench_runner_fan_out(c: &mut Criterion) {
  let mut group = c.benchmark_group("RunnerFanOut");
  let rt = Runtime::new().unwrap();

  for num_items in [4usize, 64] {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    std::fs::create_dir_all(&input).unwrap();
    let identities: Vec<String> = (0..num_items).map(|i| format!("{}.txt", i)).collect();
    for (i, name) in identities.iter().enumerate() {
      std::fs::write(input.join(name), i.to_string()).unwrap();
    }

    let storage: Arc<dyn StorageGateway> = Arc::new(FsStorage::new(&input, &output));
    let pipeline = number_pipeline(StageDeps {
      storage: storage.clone(),
      sink: Arc::new(MemorySink::new()),
      delay: Arc::new(DelaySource::new(27498, Duration::ZERO, 10).unwrap()),
    });
    let runner = PipelineRunner::new(Arc::new(pipeline), storage);

    group.throughput(Throughput::Elements(num_items as u64));
    group.bench_with_input(BenchmarkId::new("number_pipeline", num_items), &num_items, |b, _| {
      b.to_async(&rt).iter(|| async { runner.run(identities.clone()).await.unwrap() });
    });
  }
  group.finish();
}

// Keeps the single-item path honest next to the fan-out numbers.
fn bench_single_item(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let dir = TempDir::new().unwrap();
  let input = dir.path().join("input");
  let output = dir.path().join("output");
  std::fs::create_dir_all(&input).unwrap();
  std::fs::create_dir_all(&output).unwrap();
  std::fs::write(input.join("1.txt"), "3").unwrap();

  let storage: Arc<dyn StorageGateway> = Arc::new(FsStorage::new(&input, &output));
  let pipeline = number_pipeline(StageDeps {
    storage,
    sink: Arc::new(MemorySink::new()),
    delay: Arc::new(DelaySource::new(1, Duration::ZERO, 10).unwrap()),
  });

  c.bench_function("number_pipeline_single_item", |b| {
    b.to_async(&rt).iter(|| async { pipeline.run(ItemContext::new("1.txt")).await.unwrap() });
  });
}

criterion_group!(benches, bench_chain_execution, bench_runner_fan_out, bench_single_item);
criterion_main!(benches);
