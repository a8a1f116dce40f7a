// tests/sink_tests.rs
use std::sync::Arc;
use strand::sink::format_observation;
use strand::{MemorySink, ObservationSink, StdoutSink};

#[test]
fn test_observation_line_format() {
  assert_eq!(format_observation("Original number", 3), "Original number: 3");
  assert_eq!(format_observation("After Multiply By 5", -15), "After Multiply By 5: -15");
}

#[test]
fn test_memory_sink_keeps_arrival_order() {
  let sink = MemorySink::new();
  assert!(sink.is_empty());
  sink.observe("a", 1);
  sink.observe("b", 2);
  assert_eq!(sink.lines(), vec!["a: 1", "b: 2"]);
  assert_eq!(sink.len(), 2);
}

#[test]
fn test_stdout_sink_accepts_concurrent_observations() {
  let sink: Arc<dyn ObservationSink> = Arc::new(StdoutSink);
  let threads: Vec<_> = (0..4)
    .map(|i| {
      let sink = sink.clone();
      std::thread::spawn(move || {
        for n in 0..25 {
          sink.observe("Original number", i * 100 + n);
        }
      })
    })
    .collect();
  for t in threads {
    t.join().unwrap();
  }
}

#[test]
fn test_memory_sink_keeps_whole_lines_under_concurrency() {
  let sink = Arc::new(MemorySink::new());
  let threads: Vec<_> = (0..4)
    .map(|i| {
      let sink = sink.clone();
      std::thread::spawn(move || {
        for n in 0..50 {
          sink.observe("After Multiply By 5", i * 1000 + n);
        }
      })
    })
    .collect();
  for t in threads {
    t.join().unwrap();
  }

  let lines = sink.lines();
  assert_eq!(lines.len(), 200);
  assert!(lines.iter().all(|l| l.starts_with("After Multiply By 5: ")));
}
