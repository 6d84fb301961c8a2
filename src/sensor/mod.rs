//! The sensor module contains the value side of the driver: conversion from
//! raw registers to physical units, and the registry of output sinks.

pub mod convert;
pub mod registry;

pub use convert::*;
pub use registry::*;
