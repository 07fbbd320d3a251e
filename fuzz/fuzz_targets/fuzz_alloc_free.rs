#![no_main]
use libfuzzer_sys::fuzz_target;
use libfuzzer_sys::arbitrary::Arbitrary;
use memsim_rs::{Arena, Strategy};

#[derive(Debug, Arbitrary)]
enum Op {
    Alloc(u16),
    Free(u8),
    SetStrategy(u8),
    Reset,
}

const CAPACITY: u64 = 4096;

// Random op sequences must never break table coverage, whatever the
// strategy mix
fuzz_target!(|ops: Vec<Op>| {
    let Ok(mut arena) = Arena::new(CAPACITY) else {
        return;
    };
    let mut live: Vec<u32> = Vec::new();

    for op in ops.iter().take(256) {
        match op {
            Op::Alloc(size) => {
                if let Ok(id) = arena.allocate(*size as u64) {
                    live.push(id);
                }
            }
            Op::Free(pick) => {
                if !live.is_empty() {
                    let id = live.remove(*pick as usize % live.len());
                    let _ = arena.free(id);
                }
            }
            Op::SetStrategy(raw) => {
                arena.set_strategy(Strategy::ALL[*raw as usize % Strategy::ALL.len()]);
            }
            Op::Reset => {
                arena.reset();
                live.clear();
            }
        }
    }

    let covered: u64 = arena.snapshot().iter().map(|s| s.size).sum();
    assert_eq!(covered, CAPACITY);
});
