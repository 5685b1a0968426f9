//! Facial geometry scoring: landmarks in, score report out.

pub mod shared {
    pub mod constants;
    pub mod frame;
    pub mod geometry;
    pub mod model_resolver;
}

pub mod detection {
    pub mod domain {
        pub mod landmark_detector;
        pub mod landmark_set;
    }
    pub mod infrastructure;
}

pub mod imaging {
    pub mod domain {
        pub mod image_decoder;
    }
    pub mod infrastructure {
        pub mod image_crate_decoder;
    }
}

pub mod scoring {
    pub mod jawline_scorer;
    pub mod proportion_scorer;
    pub mod score_aggregator;
    pub mod score_report;
    pub mod skin_quality_scorer;
    pub mod symmetry_scorer;

    #[cfg(test)]
    pub(crate) mod test_faces;
}

pub mod pipeline {
    pub mod analysis_error;
    pub mod analysis_response;
    pub mod analyze_face_use_case;
    pub mod batch_analyzer;
    pub mod pipeline_logger;
    pub mod infrastructure {
        pub mod threaded_batch_analyzer;
    }
}
