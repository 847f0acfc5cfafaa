use std::env;
use std::error::Error;

use eop_series::{combine_files, LeapSecondTable};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let (Some(reference), Some(provisional)) = (args.next(), args.next()) else {
        eprintln!("usage: combine <eopc04 file> <finals file> [Leap_Second.dat]");
        std::process::exit(2);
    };
    let leap = match args.next() {
        Some(path) => LeapSecondTable::read_file(path)?,
        None => LeapSecondTable::iers(),
    };

    let series = combine_files(&reference, &provisional, &leap)?;

    let predicted = series.records.iter().filter(|r| r.is_predicted()).count();
    println!("days:       {}", series.len());
    println!("predicted:  {predicted}");
    if let (Some(first), Some(last)) = (series.records.first(), series.records.last()) {
        println!("span:       {} .. {}", first.time.date(), last.time.date());
        println!("TAI-UT1:    {:.7} s (last day)", last.tai_ut1.value());
    }
    match series.last_reliable_lod {
        Some(t) => println!("LOD until:  {}", t.date()),
        None => println!("LOD until:  end of series"),
    }
    Ok(())
}
