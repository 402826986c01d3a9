mod simulated_rig;
