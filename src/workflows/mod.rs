pub mod scholarship;
