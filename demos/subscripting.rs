use zcircuit::circuits::analysis::sweep_impedance;
use zcircuit::prelude::*;

fn main() -> Result<(), ImpedanceError> {
    // 10 Ω || 0.2 nF || 100 nH tank in series with a 5 nH lead.
    let tank = (Element::resistor().with_value(10)
        | Element::capacitor().with_value(0.2e-9)
        | Element::inductor().with_subscript("a").with_value(100e-9))
    .assign_label("p")?;
    let z1 = (tank + Element::inductor().with_subscript("b").with_value(5e-9)).assign_label(1)?;

    let none = Overrides::new();
    println!("{z1}");
    println!("{}", z1.evaluate(10e6, &none)?);
    println!("{}", z1.break_frequency("R La", &none)?);
    println!("{}", z1.break_frequency("R C", &none)?);
    println!("{}", z1.break_frequency("C Lb", &none)?);

    let freqs = SweepConfig::logarithmic(1.0e6, 1.0e9, 7).frequencies()?;
    println!("f(Hz), |Z1|(ohm), |Zp|(ohm)");
    let zp = z1.find("Zp")?;
    let tank_points = sweep_impedance(&zp, &freqs, &none)?;
    for (p, q) in sweep_impedance(&z1, &freqs, &none)?.iter().zip(&tank_points) {
        println!("{:.6e}, {:.6e}, {:.6e}", p.frequency_hz, p.impedance.norm(), q.impedance.norm());
    }
    Ok(())
}
