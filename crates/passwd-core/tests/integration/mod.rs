mod roundtrip;
mod selection;
