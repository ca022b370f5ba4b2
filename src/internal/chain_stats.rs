#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(warnings)]

use chainmap::ChainedHashMap;
use plotters::prelude::*;
use rand::Rng;

// Bucket count of the simulation tables
const TABLE_SIZE: usize = 100_000;
// Create load factors from 0.1 to 0.95 with 10 steps
const NUM_LOAD_FACTORS: usize = 10;

// String hash functions to compare for chain placement
const METHODS: [&str; 3] = ["DJB2", "FNV-1a", "Byte Sum"];

// DJB2 rolling hash, the function the library table buckets with
fn djb2(key: &str) -> u64 {
    key.chars()
        .fold(5381, |acc: u64, ch| acc.wrapping_mul(33).wrapping_add(u64::from(u32::from(ch))))
}

// FNV-1a over the key bytes
fn fnv1a(key: &str) -> u64 {
    key.bytes().fold(0xCBF2_9CE4_8422_2325_u64, |acc, byte| {
        (acc ^ u64::from(byte)).wrapping_mul(0x0100_0000_01B3)
    })
}

// Degenerate byte sum, a baseline that collides heavily on short keys
fn byte_sum(key: &str) -> u64 {
    key.bytes().fold(0_u64, |acc, byte| acc.wrapping_add(u64::from(byte)))
}

// Random lowercase keys of mixed length
fn random_keys(count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            let len = rng.random_range(4..16);
            (0..len).map(|_| char::from(rng.random_range(b'a'..=b'z'))).collect()
        })
        .collect()
}

// Estimate memory usage of a chained table holding the given chains (in bytes)
fn estimate_memory(chain_lengths: &[usize]) -> usize {
    let slot_bytes = chain_lengths.len() * std::mem::size_of::<usize>();
    let node_count: usize = chain_lengths.iter().sum();
    // each chain node carries a key, a value slot, and a next pointer
    let node_bytes = node_count
        * (std::mem::size_of::<String>()
            + std::mem::size_of::<u64>()
            + std::mem::size_of::<usize>());
    slot_bytes + node_bytes
}

// Insert every key into a TABLE_SIZE-bucket chained table under the given
// hash function, counting how deep in its chain each key lands
fn simulate(keys: &[String], hash: fn(&str) -> u64) -> (f64, usize, usize) {
    let mut chain_lengths = vec![0_usize; TABLE_SIZE];
    let mut total_probes = 0_usize;
    let mut worst = 0_usize;

    for key in keys {
        let index = (hash(key) % TABLE_SIZE as u64) as usize;
        chain_lengths[index] += 1;
        // a lookup for this key walks to its position in the chain
        let probes = chain_lengths[index];
        total_probes += probes;
        worst = worst.max(probes);
    }

    let average = total_probes as f64 / keys.len().max(1) as f64;
    let memory = estimate_memory(&chain_lengths);
    (average, worst, memory)
}

// Replay of the canonical driver: fill a two-bucket table past its capacity,
// resize it explicitly, and verify retrieval before and after
fn showcase() -> Result<(), Box<dyn std::error::Error>> {
    let mut table = ChainedHashMap::with_capacity(2)?;

    table.insert("line_1".to_string(), "Tiny hash table".to_string());
    table.insert("line_2".to_string(), "Filled beyond capacity".to_string());
    table.insert("line_3".to_string(), "Linked list saves the day!".to_string());

    println!();

    // Test storing beyond capacity
    for key in ["line_1", "line_2", "line_3"] {
        match table.get(key) {
            Some(value) => println!("{value}"),
            None => println!("Error: no entry for \"{key}\" was found."),
        }
    }

    // Test resizing
    let old_capacity = table.capacity();
    table.resize(2.0);
    let new_capacity = table.capacity();

    println!("\nResized from {old_capacity} to {new_capacity}.\n");

    // Test if data intact after resizing
    for key in ["line_1", "line_2", "line_3"] {
        match table.get(key) {
            Some(value) => println!("{value}"),
            None => println!("Error: no entry for \"{key}\" was found."),
        }
    }

    println!();
    Ok(())
}

// Draw one comparison chart with a line and point markers per hash function
fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    x_labels: &[String],
    series: &[Vec<f64>],
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series
        .iter()
        .flat_map(|v| v.iter())
        .fold(0.0, |max, &y| if y > max { y } else { max })
        * 1.1; // Add 10% margin

    let font_family = "sans-serif";
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..x_labels.len(), 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_labels(x_labels.len())
        .x_label_formatter(&|x| {
            if *x < x_labels.len() { x_labels[*x].clone() } else { "".to_string() }
        })
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    let colors = [
        RGBColor(220, 50, 50), // Bright red
        RGBColor(50, 90, 220), // Bright blue
        RGBColor(50, 180, 50), // Bright green
    ];

    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(
                series[method_idx].iter().enumerate().map(|(i, &y)| (i, y)),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            series[method_idx]
                .iter()
                .enumerate()
                .map(|(i, &y)| Circle::new((i, y), 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    showcase()?;

    // Generate load factors from 0.1 to 0.95
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    // Calculate number of keys for each load factor
    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_SIZE as f64 * load) as usize).collect();

    println!("Load factors: {:?}", load_factors);
    println!("Number of keys: {:?}", num_keys);

    // Results storage
    let mut average_chain_probes: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];
    let mut worst_chain_length: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];
    let mut memory_utilization: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];

    // Generate random keys outside the loop to ensure fair comparison
    let max_keys_needed = *num_keys.iter().max().unwrap_or(&0);
    let keys = random_keys(max_keys_needed);

    // Running experiments
    for &n_keys in &num_keys {
        println!("Testing with {} keys", n_keys);

        for (method_idx, &method) in METHODS.iter().enumerate() {
            let hash: fn(&str) -> u64 = match method {
                "DJB2" => djb2,
                "FNV-1a" => fnv1a,
                _ => byte_sum,
            };

            let (average, worst, memory) = simulate(&keys[..n_keys], hash);

            average_chain_probes[method_idx].push(average);
            worst_chain_length[method_idx].push(worst as f64);
            memory_utilization[method_idx].push(memory as f64);

            println!(
                "  {}: Avg probes = {:.2}, Worst chain = {}, Memory = {} bytes",
                method, average, worst, memory
            );
        }
    }

    let x_labels: Vec<String> = num_keys.iter().map(|&n| n.to_string()).collect();

    draw_chart(
        "average_chain_probes.png",
        "Average Probes per Lookup by Hash Function",
        "Average Lookup Time (chain probes)",
        &x_labels,
        &average_chain_probes,
    )?;

    draw_chart(
        "worst_chain_length.png",
        "Worst-Case Chain Length by Hash Function",
        "Longest Chain (entries)",
        &x_labels,
        &worst_chain_length,
    )?;

    draw_chart(
        "memory_utilization.png",
        "Memory Utilization by Hash Function",
        "Memory Utilization (bytes)",
        &x_labels,
        &memory_utilization,
    )?;

    println!(
        "Generated plot images: average_chain_probes.png, worst_chain_length.png, memory_utilization.png"
    );

    Ok(())
}
