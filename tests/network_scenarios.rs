use approx::assert_relative_eq;
use zcircuit::prelude::*;

fn none() -> Overrides {
    Overrides::new()
}

#[test]
fn every_element_is_reachable_by_label() {
    let r1: Impedance = Element::resistor().with_subscript(1).with_value(50).into();
    let la: Impedance = Element::inductor().with_subscript("a").into();
    let cd: Impedance = Element::capacitor().with_subscript("d").with_value(1e-9).into();
    let z = ((&r1 | &la).assign_label("p").unwrap() + &cd).assign_label("in").unwrap();
    for element in [&r1, &la, &cd] {
        let label = element.label().unwrap();
        assert!(z.find(&label).unwrap().ptr_eq(element));
    }
    assert!(z.find("Zin").unwrap().ptr_eq(&z));
}

#[test]
fn association_does_not_change_structure() {
    let a: Impedance = Element::resistor().with_subscript("a").into();
    let b: Impedance = Element::inductor().with_subscript("b").into();
    let c: Impedance = Element::capacitor().with_subscript("c").into();

    let left = (&a + &b) + &c;
    let right = &a + (&b + &c);
    assert_eq!(left.to_string(), "(Ra + Lb + Cc)");
    assert_eq!(left.to_string(), right.to_string());

    let labeled = (&a + &b).assign_label("ab").unwrap() + &c;
    let children = labeled.as_composite().unwrap().children();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].as_composite().unwrap().len(), 2);
    assert_eq!(labeled.to_string(), "(Zab:(Ra + Lb) + Cc)");
}

#[test]
fn display_grammar() {
    let r1 = Element::resistor().with_subscript("1").with_value(50);
    assert_eq!(r1.to_string(), "R1[50Ω]");
    let z = Element::resistor().with_value(10.0) + Element::capacitor().with_value(1e-6);
    assert_eq!(z.to_string(), "(R[10.0Ω] + C[1e-06F])");
    let tank = (Element::inductor().with_value(1) | Element::capacitor()).assign_label("t").unwrap();
    assert_eq!(tank.to_string(), "Zt:(L[1H] || C)");
}

#[test]
fn rc_round_trip() {
    let z = Element::resistor().with_subscript("1").with_value(50)
        + Element::capacitor().with_subscript("1").with_value(1e-6);
    let v = z.evaluate(1000.0, &none()).unwrap();
    assert_relative_eq!(v.re, 50.0, epsilon = 1e-3);
    assert_relative_eq!(v.im, -159.1549, epsilon = 1e-3);
}

#[test]
fn overrides_and_missing_values() {
    let r: Impedance = Element::resistor().with_subscript("1").with_value(10).into();
    let v = r.evaluate(1000.0, &Overrides::new().with("R1", 20)).unwrap();
    assert_relative_eq!(v.re, 20.0);

    let unknown = Overrides::new().with("R2", 99);
    assert_relative_eq!(r.evaluate(1000.0, &unknown).unwrap().re, 10.0);

    let x: Impedance = Element::resistor().with_subscript("x").into();
    assert_eq!(
        x.evaluate(1000.0, &none()).unwrap_err(),
        ImpedanceError::MissingValue { label: "Rx".into() }
    );
}

#[test]
fn shared_label_overrides_every_match() {
    let z = Element::resistor().with_value(1) | Element::resistor().with_value(3);
    let v = z.evaluate(1.0, &Overrides::from([("R", 10.0)])).unwrap();
    assert_relative_eq!(v.re, 5.0, max_relative = 1e-12);
}

#[test]
fn break_frequency_of_rl_pair() {
    let z = Element::resistor().with_value(100) | Element::inductor().with_value(1e-3);
    let f = z.break_frequency("R L", &none()).unwrap();
    assert_relative_eq!(f, 100.0 / (TWO_PI * 1e-3), max_relative = 1e-12);
    assert_relative_eq!(f, 15_915.49, epsilon = 1e-2);
    assert_eq!(f, z.break_frequency("L R", &none()).unwrap());
}

#[test]
fn magnitudes_cross_at_break_frequency() {
    let r: Impedance = Element::resistor().with_value(40e-3).into();
    let c: Impedance = Element::capacitor().with_value(1e-9).into();
    let z = &r + &c;
    let f = z.break_frequency("R C", &none()).unwrap();
    let zr = r.evaluate(f, &none()).unwrap().norm();
    let zc = c.evaluate(f, &none()).unwrap().norm();
    assert_relative_eq!(zr, zc, max_relative = 1e-9);
}

#[test]
fn vectorized_evaluation_is_consistent() {
    let z = ((Element::resistor().with_value(10) | Element::capacitor().with_value(0.2e-9))
        .assign_label("p")
        .unwrap()
        + Element::inductor().with_value(5e-9))
    .assign_label(1)
    .unwrap();
    let freqs = SweepConfig::logarithmic(1e6, 1e9, 200).frequencies().unwrap();
    let swept = z.evaluate(&freqs, &none()).unwrap();
    assert_eq!(swept.len(), freqs.len());
    for (i, &f) in freqs.iter().enumerate() {
        assert_eq!(swept[i], z.evaluate(f, &none()).unwrap());
    }
}
