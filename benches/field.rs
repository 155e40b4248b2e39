// -*- mode: rust; -*-
//
// This file is part of gf25519.
// See LICENSE for licensing information.

#[macro_use]
extern crate criterion;

use criterion::Criterion;

use gf25519::FieldElement;

mod field_benches {
    use super::*;

    fn a() -> FieldElement {
        FieldElement::from_hex("0x0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF")
            .unwrap()
    }

    fn b() -> FieldElement {
        FieldElement::from_hex("0x76543210FEDCBA9876543210FEDCBA9876543210FEDCBA9876543210FEDCBA98")
            .unwrap()
    }

    fn addition(c: &mut Criterion) {
        let (x, y) = (a(), b());
        c.bench_function("field element addition", move |bench| bench.iter(|| &x + &y));
    }

    fn subtraction(c: &mut Criterion) {
        let (x, y) = (a(), b());
        c.bench_function("field element subtraction", move |bench| bench.iter(|| &x - &y));
    }

    fn multiplication(c: &mut Criterion) {
        let (x, y) = (a(), b());
        c.bench_function("field element multiplication", move |bench| bench.iter(|| &x * &y));
    }

    fn squaring(c: &mut Criterion) {
        let x = a();
        c.bench_function("field element squaring", move |bench| bench.iter(|| x.square()));
    }

    fn mul32(c: &mut Criterion) {
        let x = a();
        c.bench_function("field element multiplication by 32-bit scalar", move |bench| {
            bench.iter(|| x.mul32(121_666))
        });
    }

    fn halving(c: &mut Criterion) {
        let x = a();
        c.bench_function("field element halving", move |bench| bench.iter(|| x.half()));
    }

    fn full_reduction(c: &mut Criterion) {
        let x = a();
        c.bench_function("field element full reduction", move |bench| bench.iter(|| x.reduce()));
    }

    fn inversion(c: &mut Criterion) {
        let x = a();
        c.bench_function("field element inversion", move |bench| {
            bench.iter(|| x.invert().unwrap())
        });
    }

    criterion_group! {
        name = field_benches;
        config = Criterion::default();
        targets =
        addition,
        subtraction,
        multiplication,
        squaring,
        mul32,
        halving,
        full_reduction,
        inversion,
    }
}

criterion_main!(field_benches::field_benches);
