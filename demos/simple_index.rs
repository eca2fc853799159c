use kmer_table::{IndexConfig, KmerIndex, Result, decode};

fn main() -> Result<()> {
    // ---------------------------------------------------- //
    // 1. Input sequence and parameters
    // ---------------------------------------------------- //
    let seq = "GCATCTCCTCCTCCCTCTCCCCGGGCTCCTAC";
    let query = "CTGAGCTACTATC";
    // Window length; the table gets 4^k slots.
    let k = 4;

    // ---------------------------------------------------- //
    // 2. Build the index
    // ---------------------------------------------------- //
    let mut index = KmerIndex::new(IndexConfig::new(k))?;
    let windows = index.insert_sequence(seq.as_bytes())?;

    println!("# k-mer table example");
    println!("sequence : {}", seq);
    println!("k        : {}", k);
    println!("windows  : {}", windows);
    println!();

    // ---------------------------------------------------- //
    // 3. Show occupied slots and query
    // ---------------------------------------------------- //
    println!(" slot | k-mer | count");
    println!("------+-------+------");
    for (slot, chain) in index.table().occupied() {
        println!("{:5} | {:5} | {}", slot, decode(slot as u64, k)?, chain.count());
    }
    println!();

    for hit in index.query(query.as_bytes())? {
        println!("{:<4} -> {}", hit.window, hit.outcome);
    }

    Ok(())
}
