use std::io;

use zcircuit::bode::write_bode_csv;
use zcircuit::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Four identical solder balls in parallel feeding an on-die RC decoupling network.
    let ball = (Element::resistor().with_subscript("p").with_value(1.8e-3)
        + Element::inductor().with_subscript("p").with_value(64e-12))
    .assign_label("ball")?;
    let package = (&ball | &ball | &ball | &ball).assign_label("pkg")?;
    let die = (Element::capacitor().with_subscript("d").with_value(1e-9)
        + Element::resistor().with_subscript("d").with_value(40e-3))
    .assign_label("die")?;
    let input = (package | die).assign_label("in")?;

    let freqs = logspace(7.0, 10.0, 1000);
    let data = BodeData::build(&input, &freqs, "Zin:100e6 Zdie Zpkg", "Lp Cd", &Overrides::new())?;
    for trace in &data.traces {
        let (f, m) = data.anchor(trace);
        eprintln!("{} {} at ({f:.3e} Hz, {m:.3e} ohm)", trace.label, trace.annotation);
    }
    write_bode_csv(io::stdout().lock(), &data)?;
    Ok(())
}
