use tilespace::{iter_cartesian, partition_contiguous, partition_striped, IterOptions};

/// ----------------------
/// Partition 12 items over a few worker counts
/// ----------------------
fn show_partitions(len: usize, size: usize) -> tilespace::Result<()> {
    println!("Contiguous ({} items, {} workers)", len, size);
    for rank in 0..size {
        println!("  {} {:?}", rank, partition_contiguous(0..len, rank, size)?);
    }

    println!("Striped ({} items, {} workers)", len, size);
    for rank in 0..size {
        let part: Vec<usize> = partition_striped(0..len, rank, size)?.collect();
        println!("  {} {:?}", rank, part);
    }
    Ok(())
}

/// ----------------------
/// Example Usage
/// ----------------------
fn main() -> tilespace::Result<()> {
    env_logger::init();

    show_partitions(12, 5)?;
    show_partitions(12, 3)?;

    println!("Blocks of (1:3:1, 2:6:2, 3:12:3) with blocking (2, 1, 2)");
    let dims = ["1:3:1", "2:6:2", "3:12:3"]
        .iter()
        .map(|s| s.parse())
        .collect::<tilespace::Result<Vec<tilespace::AxisSpec>>>()?;
    for tile in iter_cartesian(dims, IterOptions::default().with_blocking([2, 1, 2]))? {
        if let Some(block) = tile.as_block() {
            let parts: Vec<String> = block.iter().map(|r| r.to_string()).collect();
            println!("  ({})", parts.join(", "));
        }
    }
    Ok(())
}
