use std::io;

use nmea0183_visitor::{
    DispatcherBuilder, GGA, GSA, RMC, SentenceDecodeError, TalkerMode, Visitor,
};

#[derive(Default)]
struct Summary {
    sentences: usize,
    errors: usize,
}

impl Visitor for Summary {
    fn on_before_parse(&mut self, _sentence_type: &str, _sentence: &str) -> bool {
        self.sentences += 1;
        true
    }

    fn on_after_parse(
        &mut self,
        sentence_type: &str,
        sentence: &str,
        error: Option<&SentenceDecodeError>,
    ) {
        if let Some(error) = error {
            self.errors += 1;
            eprintln!("{sentence_type}: {error}\n\t{sentence}");
        }
    }

    fn on_gga(&mut self, gga: GGA) {
        println!(
            "GGA  {:?}  fix {}  {:>2} satellites  {:.6}, {:.6}  {} m",
            gga.time, gga.position_fix, gga.used_satellites, gga.latitude, gga.longitude, gga.altitude
        );
    }

    fn on_rmc(&mut self, rmc: RMC) {
        println!(
            "RMC  {}  {}  {:.6}, {:.6}  {} kn  {}°",
            rmc.time, rmc.status, rmc.latitude, rmc.longitude, rmc.speed, rmc.heading
        );
    }

    fn on_gsa(&mut self, gsa: GSA) {
        println!(
            "GSA  {} {}  satellites {:?}  pdop {} hdop {} vdop {}",
            gsa.selection_mode, gsa.fix_mode, gsa.satellites, gsa.pdop, gsa.hdop, gsa.vdop
        );
    }
}

fn main() -> io::Result<()> {
    let dispatcher = DispatcherBuilder::new()
        .talker_mode(TalkerMode::Any)
        .build();

    let mut summary = Summary::default();
    dispatcher.visit(io::stdin().lock(), &mut summary)?;

    eprintln!(
        "{} sentences, {} decode errors",
        summary.sentences, summary.errors
    );

    Ok(())
}
