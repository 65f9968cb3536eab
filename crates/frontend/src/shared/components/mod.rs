pub mod date_range_inputs;
pub mod multi_select;
pub mod range_slider;

pub use date_range_inputs::DateRangeInputs;
pub use multi_select::MultiSelectDropdown;
pub use range_slider::RangeSlider;
