mod measure_to_view_map;

pub(crate) use measure_to_view_map::MeasureToViewMap;
