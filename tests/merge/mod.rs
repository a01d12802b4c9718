mod merge_preconditions;
