pub mod city;
pub mod completions;
pub mod dashboard;
pub mod draw;
pub mod locales;
pub mod map;
pub mod market;
pub mod portfolio;
pub mod sector;
pub mod translate;
pub mod wallet;
